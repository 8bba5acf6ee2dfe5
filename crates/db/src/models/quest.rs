//! Quest catalog model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use jam_core::types::{DbId, Timestamp};

/// A row from the `quests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quest {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub quest_type: String,
    pub reward_points: i32,
    pub bounty_usd: Option<f64>,
    pub is_active: bool,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a quest row.
#[derive(Debug)]
pub struct CreateQuest {
    pub title: String,
    pub description: Option<String>,
    pub quest_type: String,
    pub reward_points: i32,
    pub bounty_usd: Option<f64>,
    pub created_by: DbId,
}

/// Request body for the admin create-quest endpoint. `quest_type` is
/// checked against the known values in the handler.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub quest_type: String,
    #[validate(range(min = 0))]
    pub reward_points: i32,
    #[validate(range(min = 0.0))]
    pub bounty_usd: Option<f64>,
}

/// Request body for the admin update-quest endpoint. All fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub quest_type: Option<String>,
    #[validate(range(min = 0))]
    pub reward_points: Option<i32>,
    #[validate(range(min = 0.0))]
    pub bounty_usd: Option<f64>,
    pub is_active: Option<bool>,
}

/// DTO for updating a quest row. Mirrors [`UpdateQuestRequest`] after
/// handler-side validation.
#[derive(Debug)]
pub struct UpdateQuest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub quest_type: Option<String>,
    pub reward_points: Option<i32>,
    pub bounty_usd: Option<f64>,
    pub is_active: Option<bool>,
}
