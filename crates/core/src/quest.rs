//! Quest lifecycle constants and validation.
//!
//! A project's copy of a quest moves through a fixed status machine:
//! NOT_STARTED and IN_PROGRESS feed SUBMITTED, and an admin decision
//! moves SUBMITTED to VERIFIED or REJECTED. Both decisions are final.
//! The db layer enforces the machine with conditional updates keyed on
//! the status constants below; this module also holds the request-level
//! validation the handlers run before touching the database.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Status strings as stored in `project_quests.status`.
pub const STATUS_NOT_STARTED: &str = "NOT_STARTED";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_SUBMITTED: &str = "SUBMITTED";
pub const STATUS_VERIFIED: &str = "VERIFIED";
pub const STATUS_REJECTED: &str = "REJECTED";

/// Quest type strings as stored in `quests.quest_type`.
pub const TYPE_INDIVIDUAL: &str = "INDIVIDUAL";
pub const TYPE_TEAM: &str = "TEAM";
pub const TYPE_BOTH: &str = "BOTH";

/// All valid quest type strings.
pub const VALID_QUEST_TYPES: &[&str] = &[TYPE_INDIVIDUAL, TYPE_TEAM, TYPE_BOTH];

/// Messages for decisions attempted on rows that are not SUBMITTED.
pub const MSG_ONLY_SUBMITTED_VERIFIED: &str = "Only submitted quests can be verified";
pub const MSG_ONLY_SUBMITTED_REJECTED: &str = "Only submitted quests can be rejected";

/// Maximum length for a submission URL.
pub const MAX_SUBMISSION_URL_LENGTH: usize = 2048;

/// Maximum length for verification notes and rejection reasons.
pub const MAX_NOTES_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Who a quest is offered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestType {
    Individual,
    Team,
    Both,
}

impl QuestType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_INDIVIDUAL => Ok(Self::Individual),
            TYPE_TEAM => Ok(Self::Team),
            TYPE_BOTH => Ok(Self::Both),
            _ => Err(format!(
                "Invalid quest type '{s}'. Must be one of: {}",
                VALID_QUEST_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => TYPE_INDIVIDUAL,
            Self::Team => TYPE_TEAM,
            Self::Both => TYPE_BOTH,
        }
    }

    /// Whether a project team may take this quest on.
    pub fn available_to_teams(&self) -> bool {
        matches!(self, Self::Team | Self::Both)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a quest type string is one of the accepted values.
pub fn validate_quest_type(quest_type: &str) -> Result<(), String> {
    if VALID_QUEST_TYPES.contains(&quest_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid quest type '{quest_type}'. Must be one of: {}",
            VALID_QUEST_TYPES.join(", ")
        ))
    }
}

/// Validate a submission URL: non-empty, http(s), and within length limits.
pub fn validate_submission_url(url: &str) -> Result<(), String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("Submission URL is required".to_string());
    }
    if trimmed.len() > MAX_SUBMISSION_URL_LENGTH {
        return Err(format!(
            "Submission URL exceeds maximum length of {MAX_SUBMISSION_URL_LENGTH}"
        ));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err("Submission URL must start with http:// or https://".to_string());
    }
    Ok(())
}

/// Validate a rejection reason: teams must receive actionable feedback.
pub fn validate_rejection_reason(reason: &str) -> Result<(), String> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err("A rejection reason is required".to_string());
    }
    if trimmed.len() > MAX_NOTES_LENGTH {
        return Err(format!(
            "Rejection reason exceeds maximum length of {MAX_NOTES_LENGTH}"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- QuestType ------------------------------------------------------------

    #[test]
    fn type_as_str_round_trip() {
        for qt in &[QuestType::Individual, QuestType::Team, QuestType::Both] {
            assert_eq!(QuestType::from_str_value(qt.as_str()).unwrap(), *qt);
        }
    }

    #[test]
    fn type_from_str_invalid() {
        let result = QuestType::from_str_value("SOLO");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid quest type"));
    }

    #[test]
    fn team_and_both_available_to_teams() {
        assert!(QuestType::Team.available_to_teams());
        assert!(QuestType::Both.available_to_teams());
        assert!(!QuestType::Individual.available_to_teams());
    }

    // -- validate_quest_type --------------------------------------------------

    #[test]
    fn valid_types_accepted() {
        for t in VALID_QUEST_TYPES {
            assert!(validate_quest_type(t).is_ok());
        }
    }

    #[test]
    fn invalid_type_rejected() {
        let result = validate_quest_type("GROUP");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid quest type"));
    }

    // -- validate_submission_url ----------------------------------------------

    #[test]
    fn https_url_accepted() {
        assert!(validate_submission_url("https://github.com/team/repo/pull/4").is_ok());
    }

    #[test]
    fn http_url_accepted() {
        assert!(validate_submission_url("http://demo.example.com").is_ok());
    }

    #[test]
    fn empty_url_rejected() {
        let result = validate_submission_url("");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn whitespace_url_rejected() {
        assert!(validate_submission_url("   ").is_err());
    }

    #[test]
    fn schemeless_url_rejected() {
        let result = validate_submission_url("github.com/team/repo");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("http"));
    }

    #[test]
    fn overlong_url_rejected() {
        let url = format!("https://{}", "a".repeat(MAX_SUBMISSION_URL_LENGTH));
        let result = validate_submission_url(&url);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("maximum length"));
    }

    // -- validate_rejection_reason --------------------------------------------

    #[test]
    fn reason_accepted() {
        assert!(validate_rejection_reason("Demo link returns a 404").is_ok());
    }

    #[test]
    fn empty_reason_rejected() {
        let result = validate_rejection_reason("");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn whitespace_reason_rejected() {
        assert!(validate_rejection_reason("  \t ").is_err());
    }

    #[test]
    fn overlong_reason_rejected() {
        let reason = "x".repeat(MAX_NOTES_LENGTH + 1);
        assert!(validate_rejection_reason(&reason).is_err());
    }

    // -- Constant completeness ------------------------------------------------

    #[test]
    fn quest_types_complete() {
        assert_eq!(VALID_QUEST_TYPES.len(), 3);
    }
}
