//! Handlers for the `/projects` resource and project membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sqlx::PgPool;

use jam_core::error::CoreError;
use jam_core::types::DbId;
use jam_db::models::project::{
    CreateProject, CreateProjectRequest, Project, ProjectMember, ProjectMemberInfo,
    UpdateProjectRequest,
};
use jam_db::repositories::{ProjectMemberRepo, ProjectRepo};

use crate::auth::ensure_admin;
use crate::error::{validate_request, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fail with `NotFound` unless the project exists.
pub async fn ensure_project_exists(pool: &PgPool, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;
    Ok(())
}

/// Fail with `Forbidden` unless the user belongs to the project.
pub async fn ensure_member(pool: &PgPool, project_id: DbId, user_id: DbId) -> AppResult<()> {
    if ProjectMemberRepo::is_member(pool, project_id, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only project members may do this".into(),
        )))
    }
}

/// POST /api/v1/projects
///
/// Create a project. The creator becomes its first member (OWNER role).
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_request(&input)?;

    let create = CreateProject {
        name: input.name,
        description: input.description,
        created_by: auth.user_id,
    };

    let project = ProjectRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = project.id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Update profile fields and deliverable URLs. Members only; this is
/// how a team fills in the deliverables that gate later stages.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    validate_request(&input)?;
    ensure_project_exists(&state.pool, id).await?;
    ensure_member(&state.pool, id, auth.user_id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;

    tracing::info!(user_id = auth.user_id, project_id = id, "Project updated");

    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/members
///
/// Join a project. Duplicate joins surface as 409 via the unique
/// constraint on (project_id, user_id).
pub async fn join(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ProjectMember>)> {
    ensure_project_exists(&state.pool, id).await?;

    let member = ProjectMemberRepo::add(&state.pool, id, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, project_id = id, "Member joined project");

    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/v1/projects/{id}/members
pub async fn list_members(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectMemberInfo>>>> {
    ensure_project_exists(&state.pool, id).await?;
    let members = ProjectMemberRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// DELETE /api/v1/projects/{id}/members/{user_id}
///
/// Leave a project, or (as admin) remove someone else.
pub async fn remove_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project_exists(&state.pool, id).await?;

    if auth.user_id != user_id {
        ensure_admin(&state.pool, auth.user_id).await?;
    }

    let removed = ProjectMemberRepo::remove(&state.pool, id, user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectMember",
            id: user_id,
        }));
    }

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        removed_user_id = user_id,
        "Member removed from project"
    );

    Ok(StatusCode::NO_CONTENT)
}
