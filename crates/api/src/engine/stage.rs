//! Stage advancement engine.
//!
//! Loads the project, its verified-quest count, and its member count,
//! and hands them to the pure evaluator in `jam_core::stage`. The write
//! path (`advance`) repeats the evaluation inside one transaction with
//! the project row locked, so the check and the stage update cannot be
//! interleaved with a concurrent advance.

use sqlx::PgPool;

use jam_core::error::CoreError;
use jam_core::stage::{evaluate_advancement, AdvancementCheck, Stage, MSG_HIGHEST_STAGE};
use jam_core::types::DbId;
use jam_db::models::project::Project;
use jam_db::repositories::{ProjectMemberRepo, ProjectQuestRepo, ProjectRepo};

use crate::error::{AppError, AppResult};

/// Decides and performs stage advancement for projects.
pub struct StageEngine;

impl StageEngine {
    /// Evaluate whether the project may advance to its next stage.
    ///
    /// Read-only; safe to call from anywhere, including as the advisory
    /// check after a quest verification.
    pub async fn check_advancement(pool: &PgPool, project_id: DbId) -> AppResult<AdvancementCheck> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;

        let current = parse_stored_stage(&project)?;
        let quests_completed =
            ProjectQuestRepo::count_verified_for_project(pool, project_id).await?;
        let team_members = ProjectMemberRepo::count_for_project(pool, project_id).await?;

        Ok(evaluate_advancement(
            project_id,
            current,
            quests_completed,
            team_members,
            &project.filled_deliverables(),
        ))
    }

    /// Advance the project one step up the ladder.
    ///
    /// Re-runs the requirement check inside a transaction holding a
    /// `FOR UPDATE` lock on the project row, then writes the new stage
    /// with the current stage as a guard. Fails with a validation error
    /// carrying every missing requirement when the check does not pass.
    pub async fn advance(pool: &PgPool, project_id: DbId) -> AppResult<Stage> {
        let mut tx = pool.begin().await?;

        let project = ProjectRepo::find_for_update(&mut tx, project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;

        let current = parse_stored_stage(&project)?;
        let quests_completed =
            ProjectQuestRepo::count_verified_for_project_tx(&mut tx, project_id).await?;
        let team_members = ProjectMemberRepo::count_for_project_tx(&mut tx, project_id).await?;

        let check = evaluate_advancement(
            project_id,
            current,
            quests_completed,
            team_members,
            &project.filled_deliverables(),
        );

        let next = match check.next_stage {
            Some(next) => next,
            None => {
                return Err(AppError::Core(CoreError::Validation(
                    MSG_HIGHEST_STAGE.to_string(),
                )))
            }
        };

        if !check.can_advance {
            return Err(AppError::Core(CoreError::Validation(
                check.missing_requirements.join("; "),
            )));
        }

        let updated =
            ProjectRepo::advance_stage(&mut tx, project_id, current.as_str(), next.as_str())
                .await?;
        if !updated {
            // The row lock makes this unreachable in practice; kept as a
            // guard against writes that bypass the engine.
            return Err(AppError::Core(CoreError::Conflict(
                "Project stage changed concurrently".to_string(),
            )));
        }

        tx.commit().await?;

        tracing::info!(
            project_id,
            from_stage = current.as_str(),
            to_stage = next.as_str(),
            "Project advanced to next stage"
        );

        Ok(next)
    }

    /// Set the stage directly, without requirement checks.
    ///
    /// Admin override: any target stage is accepted, including moves
    /// backward down the ladder. The forward-only invariant deliberately
    /// does not apply here; this is the correction escape hatch.
    pub async fn set_stage(pool: &PgPool, project_id: DbId, stage: Stage) -> AppResult<Project> {
        let project = ProjectRepo::set_stage(pool, project_id, stage.as_str())
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;

        tracing::info!(
            project_id,
            stage = stage.as_str(),
            "Project stage set by admin override"
        );

        Ok(project)
    }
}

/// Parse the stage column of a loaded project row.
///
/// The engines are the only writers of `projects.stage`, so a value
/// outside the ladder means the store was modified out of band.
fn parse_stored_stage(project: &Project) -> Result<Stage, AppError> {
    Stage::from_str_value(&project.stage).map_err(|e| {
        AppError::Core(CoreError::Internal(format!(
            "Project {} has corrupt stage: {e}",
            project.id
        )))
    })
}
