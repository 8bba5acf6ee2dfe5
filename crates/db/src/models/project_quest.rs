//! Project quest progress model and verification DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use jam_core::types::{DbId, Timestamp};

/// A row from the `project_quests` table: one project's progress on one
/// quest, from start through submission to the admin decision.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectQuest {
    pub id: DbId,
    pub project_id: DbId,
    pub quest_id: DbId,
    pub status: String,
    pub is_verified: bool,
    pub submission_url: Option<String>,
    pub submission_notes: Option<String>,
    pub submitted_by: Option<DbId>,
    pub submitted_at: Option<Timestamp>,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub verification_notes: Option<String>,
    pub payment_tx_hash: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a submission.
#[derive(Debug)]
pub struct SubmitQuest {
    pub submission_url: String,
    pub submission_notes: Option<String>,
    pub submitted_by: DbId,
}

/// Request body for submitting quest evidence.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuestRequest {
    /// Checked by `jam_core::quest::validate_submission_url` in the handler.
    pub submission_url: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request body for verifying a submission.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyQuestRequest {
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(max = 200))]
    pub payment_tx_hash: Option<String>,
}

/// Request body for rejecting a submission. The reason is mandatory;
/// emptiness is checked in the engine so the rule lives in one place.
#[derive(Debug, Deserialize)]
pub struct RejectQuestRequest {
    pub reason: String,
}

/// A pending submission joined with its project, quest, and submitter,
/// as shown in the admin verification queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingVerification {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub quest_id: DbId,
    pub quest_title: String,
    pub reward_points: i32,
    pub bounty_usd: Option<f64>,
    pub submission_url: Option<String>,
    pub submission_notes: Option<String>,
    pub submitted_by_username: Option<String>,
    pub submitted_at: Option<Timestamp>,
}
