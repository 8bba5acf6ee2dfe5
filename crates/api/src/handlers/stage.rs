//! Handlers for stage advancement.
//!
//! The check is readable by any authenticated user so teams can see
//! what they are missing; the advance and override writes are admin
//! actions.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use jam_core::error::CoreError;
use jam_core::stage::{AdvancementCheck, Stage};
use jam_core::types::DbId;
use jam_db::models::project::Project;

use crate::engine::StageEngine;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/projects/{id}/stage`.
#[derive(Debug, Deserialize)]
pub struct SetStageRequest {
    pub stage: String,
}

/// Response for a successful advance.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub project_id: DbId,
    pub stage: Stage,
}

/// GET /api/v1/projects/{id}/advancement
pub async fn check_advancement(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdvancementCheck>>> {
    let check = StageEngine::check_advancement(&state.pool, id).await?;
    Ok(Json(DataResponse { data: check }))
}

/// POST /api/v1/projects/{id}/advance
///
/// Move the project one step up the ladder. Deliberate admin action;
/// verification never advances a project on its own.
pub async fn advance(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdvanceResponse>> {
    let stage = StageEngine::advance(&state.pool, id).await?;

    tracing::info!(
        admin_id = admin.user_id,
        project_id = id,
        stage = stage.as_str(),
        "Stage advancement performed"
    );

    Ok(Json(AdvanceResponse {
        project_id: id,
        stage,
    }))
}

/// PUT /api/v1/admin/projects/{id}/stage
///
/// Override the stage without requirement checks. Backward moves are
/// allowed; see [`StageEngine::set_stage`] for the contract.
pub async fn set_stage(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStageRequest>,
) -> AppResult<Json<Project>> {
    let stage = Stage::from_str_value(&input.stage)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let project = StageEngine::set_stage(&state.pool, id, stage).await?;

    tracing::info!(
        admin_id = admin.user_id,
        project_id = id,
        stage = stage.as_str(),
        "Stage override applied"
    );

    Ok(Json(project))
}
