//! Repository for the `project_quests` table.
//!
//! Every status transition is a conditional update whose WHERE clause
//! carries the legal source statuses. Zero affected rows means the
//! guard lost; callers disambiguate missing row vs. illegal status with
//! a follow-up read.

use sqlx::PgPool;

use jam_core::quest::{
    STATUS_IN_PROGRESS, STATUS_NOT_STARTED, STATUS_REJECTED, STATUS_SUBMITTED, STATUS_VERIFIED,
};
use jam_core::types::DbId;

use crate::models::project_quest::{PendingVerification, ProjectQuest, SubmitQuest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, quest_id, status, is_verified, submission_url, \
    submission_notes, submitted_by, submitted_at, verified_by, verified_at, \
    verification_notes, payment_tx_hash, paid_at, created_at, updated_at";

/// Provides lifecycle operations for a project's quest progress rows.
pub struct ProjectQuestRepo;

impl ProjectQuestRepo {
    /// Start a quest for a project: create the row as IN_PROGRESS, or
    /// flip an existing NOT_STARTED row. Returns `None` when a row
    /// exists in any other status.
    pub async fn start(
        pool: &PgPool,
        project_id: DbId,
        quest_id: DbId,
    ) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_quests (project_id, quest_id, status)
             VALUES ($1, $2, '{STATUS_IN_PROGRESS}')
             ON CONFLICT (project_id, quest_id)
             DO UPDATE SET status = '{STATUS_IN_PROGRESS}'
             WHERE project_quests.status = '{STATUS_NOT_STARTED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(project_id)
            .bind(quest_id)
            .fetch_optional(pool)
            .await
    }

    /// File a submission. Allowed from NOT_STARTED, IN_PROGRESS, and
    /// SUBMITTED (resubmission replaces the evidence). Returns `None`
    /// when the row is missing or already decided.
    pub async fn submit(
        pool: &PgPool,
        project_id: DbId,
        quest_id: DbId,
        input: &SubmitQuest,
    ) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_quests SET
                status = '{STATUS_SUBMITTED}',
                submission_url = $3,
                submission_notes = $4,
                submitted_by = $5,
                submitted_at = NOW()
             WHERE project_id = $1 AND quest_id = $2
               AND status IN ('{STATUS_NOT_STARTED}', '{STATUS_IN_PROGRESS}', '{STATUS_SUBMITTED}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(project_id)
            .bind(quest_id)
            .bind(&input.submission_url)
            .bind(&input.submission_notes)
            .bind(input.submitted_by)
            .fetch_optional(pool)
            .await
    }

    /// Verify a SUBMITTED row. When a payment hash is supplied the
    /// payout columns are stamped in the same write. Returns `None`
    /// when the row is missing or not SUBMITTED.
    pub async fn verify(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        notes: Option<&str>,
        payment_tx_hash: Option<&str>,
    ) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_quests SET
                status = '{STATUS_VERIFIED}',
                is_verified = true,
                verified_by = $2,
                verification_notes = $3,
                verified_at = NOW(),
                payment_tx_hash = COALESCE($4, payment_tx_hash),
                paid_at = CASE WHEN $4 IS NOT NULL THEN NOW() ELSE paid_at END
             WHERE id = $1 AND status = '{STATUS_SUBMITTED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(notes)
            .bind(payment_tx_hash)
            .fetch_optional(pool)
            .await
    }

    /// Reject a SUBMITTED row with a reason. Payment columns are never
    /// touched on rejection. Returns `None` when the row is missing or
    /// not SUBMITTED.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        reason: &str,
    ) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_quests SET
                status = '{STATUS_REJECTED}',
                is_verified = false,
                verified_by = $2,
                verification_notes = $3,
                verified_at = NOW()
             WHERE id = $1 AND status = '{STATUS_SUBMITTED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Find a progress row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_quests WHERE id = $1");
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the progress row for a (project, quest) pair.
    pub async fn find_by_project_and_quest(
        pool: &PgPool,
        project_id: DbId,
        quest_id: DbId,
    ) -> Result<Option<ProjectQuest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_quests WHERE project_id = $1 AND quest_id = $2");
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(project_id)
            .bind(quest_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's progress rows, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectQuest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_quests WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectQuest>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count a project's VERIFIED quests.
    pub async fn count_verified_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM project_quests
             WHERE project_id = $1 AND status = '{STATUS_VERIFIED}'"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Count a project's VERIFIED quests inside an advancement transaction.
    pub async fn count_verified_for_project_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM project_quests
             WHERE project_id = $1 AND status = '{STATUS_VERIFIED}'"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(project_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// The admin verification queue: SUBMITTED rows joined with project,
    /// quest, and submitter, oldest submission first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<PendingVerification>, sqlx::Error> {
        let query = format!(
            "SELECT
                pq.id,
                pq.project_id,
                p.name AS project_name,
                pq.quest_id,
                q.title AS quest_title,
                q.reward_points,
                q.bounty_usd,
                pq.submission_url,
                pq.submission_notes,
                u.username AS submitted_by_username,
                pq.submitted_at
             FROM project_quests pq
             JOIN projects p ON p.id = pq.project_id
             JOIN quests q ON q.id = pq.quest_id
             LEFT JOIN users u ON u.id = pq.submitted_by
             WHERE pq.status = '{STATUS_SUBMITTED}'
             ORDER BY pq.submitted_at ASC"
        );
        sqlx::query_as::<_, PendingVerification>(&query)
            .fetch_all(pool)
            .await
    }
}
