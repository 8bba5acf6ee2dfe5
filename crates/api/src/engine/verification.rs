//! Quest verification engine.
//!
//! Carries the two admin decisions on a submitted quest: verify and
//! reject. Each decision is a single conditional update guarded on
//! `status = SUBMITTED`, so a second decision on the same row loses the
//! guard and fails with a validation error instead of overwriting the
//! first. The admin gate re-checks the database on every call.

use sqlx::PgPool;

use jam_core::error::CoreError;
use jam_core::quest::{
    validate_rejection_reason, MSG_ONLY_SUBMITTED_REJECTED, MSG_ONLY_SUBMITTED_VERIFIED,
};
use jam_core::types::DbId;
use jam_db::models::project_quest::ProjectQuest;
use jam_db::repositories::ProjectQuestRepo;

use crate::auth::ensure_admin;
use crate::error::{AppError, AppResult};

/// Applies admin decisions to submitted project quests.
pub struct VerificationEngine;

impl VerificationEngine {
    /// Mark a SUBMITTED quest as VERIFIED.
    ///
    /// When `payment_tx_hash` is given, the payout columns are stamped
    /// in the same write. Fails with `Unauthorized` unless `admin_id`
    /// is an active admin, `NotFound` when the row does not exist, and
    /// a validation error when the row is not SUBMITTED.
    pub async fn verify(
        pool: &PgPool,
        project_quest_id: DbId,
        admin_id: DbId,
        notes: Option<&str>,
        payment_tx_hash: Option<&str>,
    ) -> AppResult<ProjectQuest> {
        ensure_admin(pool, admin_id).await?;

        let updated =
            ProjectQuestRepo::verify(pool, project_quest_id, admin_id, notes, payment_tx_hash)
                .await?;

        match updated {
            Some(row) => {
                tracing::info!(
                    project_quest_id,
                    project_id = row.project_id,
                    quest_id = row.quest_id,
                    admin_id,
                    paid = payment_tx_hash.is_some(),
                    "Quest submission verified"
                );
                Ok(row)
            }
            None => Err(Self::decision_failure(pool, project_quest_id, MSG_ONLY_SUBMITTED_VERIFIED).await?),
        }
    }

    /// Mark a SUBMITTED quest as REJECTED with a mandatory reason.
    ///
    /// Payment columns are never touched on rejection, and rejection
    /// does not trigger an advancement check.
    pub async fn reject(
        pool: &PgPool,
        project_quest_id: DbId,
        admin_id: DbId,
        reason: &str,
    ) -> AppResult<ProjectQuest> {
        ensure_admin(pool, admin_id).await?;

        validate_rejection_reason(reason)
            .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

        let updated = ProjectQuestRepo::reject(pool, project_quest_id, admin_id, reason).await?;

        match updated {
            Some(row) => {
                tracing::info!(
                    project_quest_id,
                    project_id = row.project_id,
                    quest_id = row.quest_id,
                    admin_id,
                    "Quest submission rejected"
                );
                Ok(row)
            }
            None => Err(Self::decision_failure(pool, project_quest_id, MSG_ONLY_SUBMITTED_REJECTED).await?),
        }
    }

    /// Disambiguate a lost decision guard: a missing row is `NotFound`,
    /// an existing row in any other status is a validation failure.
    async fn decision_failure(
        pool: &PgPool,
        project_quest_id: DbId,
        status_message: &str,
    ) -> Result<AppError, AppError> {
        match ProjectQuestRepo::find_by_id(pool, project_quest_id).await? {
            Some(_) => Ok(AppError::Core(CoreError::Validation(
                status_message.to_string(),
            ))),
            None => Ok(AppError::Core(CoreError::NotFound {
                entity: "ProjectQuest",
                id: project_quest_id,
            })),
        }
    }
}
