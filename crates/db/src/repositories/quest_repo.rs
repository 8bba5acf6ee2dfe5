//! Repository for the `quests` table.

use sqlx::PgPool;

use jam_core::types::DbId;

use crate::models::quest::{CreateQuest, Quest, UpdateQuest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, quest_type, reward_points, bounty_usd, \
                        is_active, created_by, created_at, updated_at";

/// Provides CRUD operations for the quest catalog.
pub struct QuestRepo;

impl QuestRepo {
    /// Insert a new quest, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuest) -> Result<Quest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quests (title, description, quest_type, reward_points, bounty_usd, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.quest_type)
            .bind(input.reward_points)
            .bind(input.bounty_usd)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a quest by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quests WHERE id = $1");
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quests, optionally including deactivated ones, newest first.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Quest>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM quests ORDER BY created_at DESC")
        } else {
            format!(
                "SELECT {COLUMNS} FROM quests WHERE is_active = true ORDER BY created_at DESC"
            )
        };
        sqlx::query_as::<_, Quest>(&query).fetch_all(pool).await
    }

    /// Update a quest. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuest,
    ) -> Result<Option<Quest>, sqlx::Error> {
        let query = format!(
            "UPDATE quests SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                quest_type = COALESCE($4, quest_type),
                reward_points = COALESCE($5, reward_points),
                bounty_usd = COALESCE($6, bounty_usd),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.quest_type)
            .bind(input.reward_points)
            .bind(input.bounty_usd)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a quest so new starts are refused. Existing progress
    /// rows keep their history. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE quests SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
