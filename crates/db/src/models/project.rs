//! Project and project membership models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use jam_core::stage::{
    FIELD_PITCH_DECK_URL, FIELD_PRODUCTION_URL, FIELD_REPOSITORY_URL, FIELD_VIDEO_URL,
};
use jam_core::types::{DbId, Timestamp};

/// Membership role of the project creator.
pub const ROLE_OWNER: &str = "OWNER";
/// Membership role of everyone who joins later.
pub const ROLE_MEMBER: &str = "MEMBER";

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub stage: String,
    pub repository_url: Option<String>,
    pub production_url: Option<String>,
    pub pitch_deck_url: Option<String>,
    pub video_url: Option<String>,
    pub logo_url: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Names of the deliverable fields that hold a non-empty value.
    ///
    /// Order matches the requirement tables, so missing-requirement
    /// messages come out in a stable order.
    pub fn filled_deliverables(&self) -> Vec<String> {
        let fields = [
            (FIELD_REPOSITORY_URL, &self.repository_url),
            (FIELD_PRODUCTION_URL, &self.production_url),
            (FIELD_PITCH_DECK_URL, &self.pitch_deck_url),
            (FIELD_VIDEO_URL, &self.video_url),
        ];
        fields
            .iter()
            .filter(|(_, value)| matches!(value, Some(v) if !v.trim().is_empty()))
            .map(|(name, _)| (*name).to_string())
            .collect()
    }
}

/// DTO for inserting a project row.
#[derive(Debug)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub created_by: DbId,
}

/// Request body for creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Request body for updating a project. All fields are optional;
/// deliverable URLs are set here as the team completes them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub repository_url: Option<String>,
    #[validate(url)]
    pub production_url: Option<String>,
    #[validate(url)]
    pub pitch_deck_url: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// A membership row joined with the member's public identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMemberInfo {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}
