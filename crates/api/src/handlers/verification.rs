//! Handlers for the admin verification workflow.
//!
//! The decision endpoints delegate to [`VerificationEngine`]; after a
//! successful verification the handler runs the advisory advancement
//! check and attaches the result, so the admin sees immediately whether
//! the project became eligible to advance. The check never blocks or
//! fails the verification itself.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use jam_core::stage::AdvancementCheck;
use jam_core::types::DbId;
use jam_db::models::project_quest::{
    PendingVerification, ProjectQuest, RejectQuestRequest, VerifyQuestRequest,
};
use jam_db::repositories::ProjectQuestRepo;

use crate::engine::{StageEngine, VerificationEngine};
use crate::error::{validate_request, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for a successful verification: the updated row plus the
/// advisory advancement check (absent when the check itself failed).
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub project_quest: ProjectQuest,
    pub advancement: Option<AdvancementCheck>,
}

/// POST /api/v1/project-quests/{id}/verify
pub async fn verify(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VerifyQuestRequest>,
) -> AppResult<Json<VerificationResponse>> {
    validate_request(&input)?;

    let row = VerificationEngine::verify(
        &state.pool,
        id,
        admin.user_id,
        input.notes.as_deref(),
        input.payment_tx_hash.as_deref(),
    )
    .await?;

    // Advisory side effect: report whether the project can now advance.
    // A failure here is logged and swallowed; the verification stands.
    let advancement = match StageEngine::check_advancement(&state.pool, row.project_id).await {
        Ok(check) => {
            if check.can_advance {
                tracing::info!(
                    project_id = row.project_id,
                    next_stage = ?check.next_stage,
                    "Project is eligible to advance after verification"
                );
            }
            Some(check)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                project_id = row.project_id,
                "Post-verification advancement check failed"
            );
            None
        }
    };

    Ok(Json(VerificationResponse {
        project_quest: row,
        advancement,
    }))
}

/// POST /api/v1/project-quests/{id}/reject
pub async fn reject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectQuestRequest>,
) -> AppResult<Json<ProjectQuest>> {
    let row = VerificationEngine::reject(&state.pool, id, admin.user_id, &input.reason).await?;
    Ok(Json(row))
}

/// GET /api/v1/admin/verifications/pending
///
/// The verification queue: SUBMITTED rows with project, quest, and
/// submitter context, oldest submission first.
pub async fn list_pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PendingVerification>>>> {
    let pending = ProjectQuestRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: pending }))
}
