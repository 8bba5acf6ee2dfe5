//! Project stage ladder and advancement evaluation.
//!
//! Defines the fixed stage lifecycle, the per-stage requirement table,
//! and the pure evaluation logic that decides whether a project may
//! advance. Evaluation runs against pre-loaded counts and field lists
//! passed in by the caller; this crate never touches the database.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stage strings as stored in `projects.stage`.
pub const STAGE_IDEA: &str = "IDEA";
pub const STAGE_PROTOTYPE: &str = "PROTOTYPE";
pub const STAGE_BUILD: &str = "BUILD";
pub const STAGE_PROJECT: &str = "PROJECT";
pub const STAGE_INCUBATE: &str = "INCUBATE";
pub const STAGE_ACCELERATE: &str = "ACCELERATE";
pub const STAGE_SCALE: &str = "SCALE";

/// All valid stage strings, in ladder order.
pub const VALID_STAGES: &[&str] = &[
    STAGE_IDEA,
    STAGE_PROTOTYPE,
    STAGE_BUILD,
    STAGE_PROJECT,
    STAGE_INCUBATE,
    STAGE_ACCELERATE,
    STAGE_SCALE,
];

/// Project deliverable columns that stage requirements may demand.
pub const FIELD_REPOSITORY_URL: &str = "repository_url";
pub const FIELD_PRODUCTION_URL: &str = "production_url";
pub const FIELD_PITCH_DECK_URL: &str = "pitch_deck_url";
pub const FIELD_VIDEO_URL: &str = "video_url";

/// All deliverable field names, in the order requirements list them.
pub const DELIVERABLE_FIELDS: &[&str] = &[
    FIELD_REPOSITORY_URL,
    FIELD_PRODUCTION_URL,
    FIELD_PITCH_DECK_URL,
    FIELD_VIDEO_URL,
];

/// Message returned when a project already sits at the final stage.
pub const MSG_HIGHEST_STAGE: &str = "already at highest stage";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The lifecycle position of a project.
///
/// Ordering follows the ladder, so `Stage::Idea < Stage::Scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Idea,
    Prototype,
    Build,
    Project,
    Incubate,
    Accelerate,
    Scale,
}

/// All stages in ladder order.
pub const STAGE_ORDER: &[Stage] = &[
    Stage::Idea,
    Stage::Prototype,
    Stage::Build,
    Stage::Project,
    Stage::Incubate,
    Stage::Accelerate,
    Stage::Scale,
];

impl Stage {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STAGE_IDEA => Ok(Self::Idea),
            STAGE_PROTOTYPE => Ok(Self::Prototype),
            STAGE_BUILD => Ok(Self::Build),
            STAGE_PROJECT => Ok(Self::Project),
            STAGE_INCUBATE => Ok(Self::Incubate),
            STAGE_ACCELERATE => Ok(Self::Accelerate),
            STAGE_SCALE => Ok(Self::Scale),
            _ => Err(format!(
                "Invalid stage '{s}'. Must be one of: {}",
                VALID_STAGES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idea => STAGE_IDEA,
            Self::Prototype => STAGE_PROTOTYPE,
            Self::Build => STAGE_BUILD,
            Self::Project => STAGE_PROJECT,
            Self::Incubate => STAGE_INCUBATE,
            Self::Accelerate => STAGE_ACCELERATE,
            Self::Scale => STAGE_SCALE,
        }
    }

    /// The next stage up the ladder, or `None` at SCALE.
    pub fn successor(&self) -> Option<Stage> {
        match self {
            Self::Idea => Some(Self::Prototype),
            Self::Prototype => Some(Self::Build),
            Self::Build => Some(Self::Project),
            Self::Project => Some(Self::Incubate),
            Self::Incubate => Some(Self::Accelerate),
            Self::Accelerate => Some(Self::Scale),
            Self::Scale => None,
        }
    }
}

/// One unmet advancement requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingRequirement {
    /// Not enough verified quests.
    QuestsCompleted { min: u32, actual: i64 },
    /// Not enough team members.
    TeamMembers { min: u32, actual: i64 },
    /// A required deliverable field is empty.
    Deliverable { field: String },
    /// The project already sits at the final stage.
    HighestStage,
}

impl MissingRequirement {
    /// Client-facing message. The exact wording is a stable contract
    /// consumed by the web frontend; do not rephrase.
    pub fn message(&self) -> String {
        match self {
            Self::QuestsCompleted { min, actual } => {
                format!("Completar {min} quests (actualmente: {actual})")
            }
            Self::TeamMembers { min, actual } => {
                format!("Tener al menos {min} miembros (actualmente: {actual})")
            }
            Self::Deliverable { field } => format!("Completar: {field}"),
            Self::HighestStage => MSG_HIGHEST_STAGE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Requirement table
// ---------------------------------------------------------------------------

/// The bar a project must clear to reach a given target stage.
pub struct StageRequirement {
    pub target: Stage,
    pub min_quests_completed: Option<u32>,
    pub min_team_members: Option<u32>,
    pub required_deliverables: &'static [&'static str],
}

/// Requirements keyed by target stage. IDEA has no row because nothing
/// advances into it; every other stage appears exactly once.
pub const STAGE_REQUIREMENTS: &[StageRequirement] = &[
    StageRequirement {
        target: Stage::Prototype,
        min_quests_completed: Some(1),
        min_team_members: None,
        required_deliverables: &[],
    },
    StageRequirement {
        target: Stage::Build,
        min_quests_completed: Some(2),
        min_team_members: None,
        required_deliverables: &[FIELD_REPOSITORY_URL],
    },
    StageRequirement {
        target: Stage::Project,
        min_quests_completed: Some(3),
        min_team_members: Some(2),
        required_deliverables: &[FIELD_REPOSITORY_URL, FIELD_PRODUCTION_URL],
    },
    StageRequirement {
        target: Stage::Incubate,
        min_quests_completed: Some(5),
        min_team_members: Some(2),
        required_deliverables: &[
            FIELD_REPOSITORY_URL,
            FIELD_PRODUCTION_URL,
            FIELD_PITCH_DECK_URL,
        ],
    },
    StageRequirement {
        target: Stage::Accelerate,
        min_quests_completed: Some(8),
        min_team_members: Some(3),
        required_deliverables: &[
            FIELD_REPOSITORY_URL,
            FIELD_PRODUCTION_URL,
            FIELD_PITCH_DECK_URL,
            FIELD_VIDEO_URL,
        ],
    },
    StageRequirement {
        target: Stage::Scale,
        min_quests_completed: Some(12),
        min_team_members: Some(3),
        required_deliverables: &[
            FIELD_REPOSITORY_URL,
            FIELD_PRODUCTION_URL,
            FIELD_PITCH_DECK_URL,
            FIELD_VIDEO_URL,
        ],
    },
];

/// Look up the requirement row for a target stage.
pub fn requirement_for(target: Stage) -> Option<&'static StageRequirement> {
    STAGE_REQUIREMENTS.iter().find(|r| r.target == target)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Result of evaluating a project against its next stage's requirements.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancementCheck {
    pub project_id: DbId,
    pub current_stage: Stage,
    pub next_stage: Option<Stage>,
    pub can_advance: bool,
    pub quests_completed: i64,
    pub team_members: i64,
    pub missing_requirements: Vec<String>,
}

/// Evaluate whether a project may advance one step up the ladder.
///
/// Pure function; the caller pre-loads the verified quest count, the
/// member count, and the list of deliverable fields that are filled
/// (non-empty after trimming). Missing requirements are reported in a
/// fixed order: quests, members, then deliverables in table order.
pub fn evaluate_advancement(
    project_id: DbId,
    current_stage: Stage,
    quests_completed: i64,
    team_members: i64,
    filled_deliverables: &[String],
) -> AdvancementCheck {
    let next = match current_stage.successor() {
        Some(next) => next,
        None => {
            return AdvancementCheck {
                project_id,
                current_stage,
                next_stage: None,
                can_advance: false,
                quests_completed,
                team_members,
                missing_requirements: vec![MissingRequirement::HighestStage.message()],
            };
        }
    };

    let mut missing: Vec<String> = Vec::new();

    if let Some(req) = requirement_for(next) {
        if let Some(min) = req.min_quests_completed {
            if quests_completed < i64::from(min) {
                missing.push(
                    MissingRequirement::QuestsCompleted {
                        min,
                        actual: quests_completed,
                    }
                    .message(),
                );
            }
        }

        if let Some(min) = req.min_team_members {
            if team_members < i64::from(min) {
                missing.push(
                    MissingRequirement::TeamMembers {
                        min,
                        actual: team_members,
                    }
                    .message(),
                );
            }
        }

        for field in req.required_deliverables {
            if !filled_deliverables.iter().any(|f| f == field) {
                missing.push(
                    MissingRequirement::Deliverable {
                        field: (*field).to_string(),
                    }
                    .message(),
                );
            }
        }
    }

    AdvancementCheck {
        project_id,
        current_stage,
        next_stage: Some(next),
        can_advance: missing.is_empty(),
        quests_completed,
        team_members,
        missing_requirements: missing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    // -- Stage ----------------------------------------------------------------

    #[test]
    fn stage_from_str_all_valid() {
        for s in VALID_STAGES {
            assert!(Stage::from_str_value(s).is_ok(), "stage '{s}' should parse");
        }
    }

    #[test]
    fn stage_from_str_invalid() {
        let result = Stage::from_str_value("LAUNCHED");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid stage"));
    }

    #[test]
    fn stage_from_str_case_sensitive() {
        assert!(Stage::from_str_value("idea").is_err());
        assert!(Stage::from_str_value("Scale").is_err());
    }

    #[test]
    fn stage_as_str_round_trip() {
        for stage in STAGE_ORDER {
            assert_eq!(Stage::from_str_value(stage.as_str()).unwrap(), *stage);
        }
    }

    #[test]
    fn stage_order_matches_valid_stages() {
        assert_eq!(STAGE_ORDER.len(), VALID_STAGES.len());
        for (stage, s) in STAGE_ORDER.iter().zip(VALID_STAGES) {
            assert_eq!(stage.as_str(), *s);
        }
    }

    #[test]
    fn successor_walks_the_ladder() {
        assert_eq!(Stage::Idea.successor(), Some(Stage::Prototype));
        assert_eq!(Stage::Prototype.successor(), Some(Stage::Build));
        assert_eq!(Stage::Build.successor(), Some(Stage::Project));
        assert_eq!(Stage::Project.successor(), Some(Stage::Incubate));
        assert_eq!(Stage::Incubate.successor(), Some(Stage::Accelerate));
        assert_eq!(Stage::Accelerate.successor(), Some(Stage::Scale));
        assert_eq!(Stage::Scale.successor(), None);
    }

    #[test]
    fn stage_ordering_is_ascending() {
        for pair in STAGE_ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    // -- Requirement table ----------------------------------------------------

    #[test]
    fn every_stage_but_idea_has_a_requirement() {
        assert_eq!(STAGE_REQUIREMENTS.len(), STAGE_ORDER.len() - 1);
        assert!(requirement_for(Stage::Idea).is_none());
        for stage in &STAGE_ORDER[1..] {
            assert!(requirement_for(*stage).is_some(), "missing row for {stage:?}");
        }
    }

    #[test]
    fn requirement_targets_follow_ladder_order() {
        for (req, stage) in STAGE_REQUIREMENTS.iter().zip(&STAGE_ORDER[1..]) {
            assert_eq!(req.target, *stage);
        }
    }

    #[test]
    fn quest_minimums_never_decrease() {
        let mins: Vec<u32> = STAGE_REQUIREMENTS
            .iter()
            .filter_map(|r| r.min_quests_completed)
            .collect();
        assert_eq!(mins.len(), STAGE_REQUIREMENTS.len());
        for pair in mins.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn project_row_matches_platform_contract() {
        let req = requirement_for(Stage::Project).unwrap();
        assert_eq!(req.min_quests_completed, Some(3));
        assert_eq!(req.min_team_members, Some(2));
        assert_eq!(
            req.required_deliverables,
            &[FIELD_REPOSITORY_URL, FIELD_PRODUCTION_URL]
        );
    }

    #[test]
    fn deliverables_only_name_known_fields() {
        for req in STAGE_REQUIREMENTS {
            for field in req.required_deliverables {
                assert!(DELIVERABLE_FIELDS.contains(field));
            }
        }
    }

    // -- Messages -------------------------------------------------------------

    #[test]
    fn quests_message_exact_wording() {
        let msg = MissingRequirement::QuestsCompleted { min: 3, actual: 2 }.message();
        assert_eq!(msg, "Completar 3 quests (actualmente: 2)");
    }

    #[test]
    fn members_message_exact_wording() {
        let msg = MissingRequirement::TeamMembers { min: 2, actual: 1 }.message();
        assert_eq!(msg, "Tener al menos 2 miembros (actualmente: 1)");
    }

    #[test]
    fn deliverable_message_exact_wording() {
        let msg = MissingRequirement::Deliverable {
            field: "production_url".to_string(),
        }
        .message();
        assert_eq!(msg, "Completar: production_url");
    }

    #[test]
    fn highest_stage_message_exact_wording() {
        assert_eq!(
            MissingRequirement::HighestStage.message(),
            "already at highest stage"
        );
    }

    // -- evaluate_advancement -------------------------------------------------

    #[test]
    fn idea_with_no_quests_cannot_advance() {
        let check = evaluate_advancement(1, Stage::Idea, 0, 1, &[]);
        assert!(!check.can_advance);
        assert_eq!(check.next_stage, Some(Stage::Prototype));
        assert_eq!(
            check.missing_requirements,
            vec!["Completar 1 quests (actualmente: 0)"]
        );
    }

    #[test]
    fn idea_with_one_quest_advances() {
        let check = evaluate_advancement(1, Stage::Idea, 1, 1, &[]);
        assert!(check.can_advance);
        assert!(check.missing_requirements.is_empty());
    }

    #[test]
    fn build_scenario_reports_all_three_gaps() {
        // BUILD -> PROJECT needs 3 quests, 2 members, repository + production.
        let check = evaluate_advancement(7, Stage::Build, 2, 1, &filled(&["repository_url"]));
        assert!(!check.can_advance);
        assert_eq!(check.current_stage, Stage::Build);
        assert_eq!(check.next_stage, Some(Stage::Project));
        assert_eq!(
            check.missing_requirements,
            vec![
                "Completar 3 quests (actualmente: 2)",
                "Tener al menos 2 miembros (actualmente: 1)",
                "Completar: production_url",
            ]
        );
    }

    #[test]
    fn build_with_everything_advances() {
        let check = evaluate_advancement(
            7,
            Stage::Build,
            3,
            2,
            &filled(&["repository_url", "production_url"]),
        );
        assert!(check.can_advance);
        assert!(check.missing_requirements.is_empty());
        assert_eq!(check.next_stage, Some(Stage::Project));
    }

    #[test]
    fn exactly_meeting_minimums_advances() {
        // Boundary: counts equal to the minimum are enough.
        let check = evaluate_advancement(
            1,
            Stage::Project,
            5,
            2,
            &filled(&["repository_url", "production_url", "pitch_deck_url"]),
        );
        assert!(check.can_advance);
    }

    #[test]
    fn surplus_counts_still_advance() {
        let check = evaluate_advancement(1, Stage::Idea, 40, 9, &filled(DELIVERABLE_FIELDS));
        assert!(check.can_advance);
    }

    #[test]
    fn scale_is_terminal() {
        let check = evaluate_advancement(3, Stage::Scale, 99, 9, &filled(DELIVERABLE_FIELDS));
        assert!(!check.can_advance);
        assert_eq!(check.next_stage, None);
        assert_eq!(check.missing_requirements, vec!["already at highest stage"]);
    }

    #[test]
    fn unfilled_deliverables_listed_in_table_order() {
        let check = evaluate_advancement(1, Stage::Incubate, 8, 3, &[]);
        assert_eq!(
            check.missing_requirements,
            vec![
                "Completar: repository_url",
                "Completar: production_url",
                "Completar: pitch_deck_url",
                "Completar: video_url",
            ]
        );
    }

    #[test]
    fn deliverable_match_is_exact() {
        // A different filled field does not satisfy repository_url.
        let check = evaluate_advancement(1, Stage::Prototype, 2, 1, &filled(&["production_url"]));
        assert!(check
            .missing_requirements
            .contains(&"Completar: repository_url".to_string()));
    }

    #[test]
    fn evaluate_returns_the_given_counts() {
        let check = evaluate_advancement(42, Stage::Build, 2, 1, &[]);
        assert_eq!(check.project_id, 42);
        assert_eq!(check.quests_completed, 2);
        assert_eq!(check.team_members, 1);
    }

}
