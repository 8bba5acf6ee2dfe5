//! Handlers for a project's quest progress: start, submit, list.
//!
//! These feed the verification pipeline. Both mutations require project
//! membership; the admin decision endpoints live in
//! [`crate::handlers::verification`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use jam_core::error::CoreError;
use jam_core::quest::{validate_submission_url, QuestType};
use jam_core::types::DbId;
use jam_db::models::project_quest::{ProjectQuest, SubmitQuest, SubmitQuestRequest};
use jam_db::repositories::{ProjectQuestRepo, QuestRepo};

use crate::error::{validate_request, AppError, AppResult};
use crate::handlers::project::{ensure_member, ensure_project_exists};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/quests/{quest_id}/start
///
/// Take a quest on for the team. The quest must be active and offered
/// to teams (TEAM or BOTH); INDIVIDUAL quests cannot be started here.
pub async fn start(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, quest_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<ProjectQuest>)> {
    ensure_project_exists(&state.pool, project_id).await?;
    ensure_member(&state.pool, project_id, auth.user_id).await?;

    let quest = QuestRepo::find_by_id(&state.pool, quest_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Quest",
            id: quest_id,
        })?;

    if !quest.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Quest is no longer active".into(),
        )));
    }

    let quest_type = QuestType::from_str_value(&quest.quest_type).map_err(|e| {
        AppError::Core(CoreError::Internal(format!(
            "Quest {quest_id} has corrupt type: {e}"
        )))
    })?;
    if !quest_type.available_to_teams() {
        return Err(AppError::Core(CoreError::Validation(
            "This quest is individual-only and cannot be taken on by a project".into(),
        )));
    }

    let row = ProjectQuestRepo::start(&state.pool, project_id, quest_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Quest has already been started by this project".into(),
            ))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        quest_id,
        "Quest started"
    );

    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/projects/{id}/quests/{quest_id}/submit
///
/// File evidence for a quest. Allowed until an admin decides; a
/// resubmission over a pending SUBMITTED row replaces the evidence.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, quest_id)): Path<(DbId, DbId)>,
    Json(input): Json<SubmitQuestRequest>,
) -> AppResult<Json<ProjectQuest>> {
    validate_request(&input)?;
    validate_submission_url(&input.submission_url)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    ensure_project_exists(&state.pool, project_id).await?;
    ensure_member(&state.pool, project_id, auth.user_id).await?;

    let submit = SubmitQuest {
        submission_url: input.submission_url,
        submission_notes: input.notes,
        submitted_by: auth.user_id,
    };

    let updated =
        ProjectQuestRepo::submit(&state.pool, project_id, quest_id, &submit).await?;

    let row = match updated {
        Some(row) => row,
        // The guard lost: either the quest was never started or it has
        // already been decided.
        None => {
            match ProjectQuestRepo::find_by_project_and_quest(&state.pool, project_id, quest_id)
                .await?
            {
                Some(_) => {
                    return Err(AppError::Core(CoreError::Validation(
                        "Quest has already been decided and cannot be resubmitted".into(),
                    )))
                }
                None => {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "Quest progress for quest",
                        id: quest_id,
                    }))
                }
            }
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        quest_id,
        project_quest_id = row.id,
        "Quest submitted for verification"
    );

    Ok(Json(row))
}

/// GET /api/v1/projects/{id}/quests
///
/// List the project's quest progress rows, newest first.
pub async fn list_for_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectQuest>>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let rows = ProjectQuestRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: rows }))
}
