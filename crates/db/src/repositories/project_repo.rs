//! Repositories for the `projects` and `project_members` tables.

use sqlx::PgPool;

use jam_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectMember, ProjectMemberInfo, UpdateProjectRequest, ROLE_MEMBER,
    ROLE_OWNER,
};

/// Column list for projects queries.
const PROJECT_COLUMNS: &str = "id, name, description, stage, repository_url, production_url, \
    pitch_deck_url, video_url, logo_url, created_by, created_at, updated_at";

/// Column list for project_members queries.
const MEMBER_COLUMNS: &str = "id, project_id, user_id, role, created_at";

/// Provides CRUD and stage operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and its creator's OWNER membership in one
    /// transaction, returning the created project.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO projects (name, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO project_members (project_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(project.id)
            .bind(input.created_by)
            .bind(ROLE_OWNER)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project inside a transaction, locking the row until commit.
    ///
    /// Used by stage advancement so the check and the stage write see
    /// the same row with no writer in between.
    pub async fn find_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update profile fields and deliverable URLs. Only non-`None`
    /// fields are applied. Returns `None` if the project does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                repository_url = COALESCE($4, repository_url),
                production_url = COALESCE($5, production_url),
                pitch_deck_url = COALESCE($6, pitch_deck_url),
                video_url = COALESCE($7, video_url),
                logo_url = COALESCE($8, logo_url)
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.repository_url)
            .bind(&input.production_url)
            .bind(&input.pitch_deck_url)
            .bind(&input.video_url)
            .bind(&input.logo_url)
            .fetch_optional(pool)
            .await
    }

    /// Move the stage from `from` to `to` inside a transaction. The
    /// `from` guard makes the write a no-op if the stage changed since
    /// it was read. Returns `true` if the row was updated.
    pub async fn advance_stage(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET stage = $3 WHERE id = $1 AND stage = $2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the stage unconditionally. Returns the updated project, or
    /// `None` if it does not exist.
    pub async fn set_stage(
        pool: &PgPool,
        id: DbId,
        stage: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET stage = $2 WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(stage)
            .fetch_optional(pool)
            .await
    }
}

/// Provides membership operations for projects.
pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Add a user to a project as a plain member, returning the row.
    ///
    /// A duplicate membership violates `uq_project_members_project_user`
    /// and surfaces as a database error the api layer maps to a conflict.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(ROLE_MEMBER)
            .fetch_one(pool)
            .await
    }

    /// List a project's members with their public identity, owner first,
    /// then by join date.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMemberInfo>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMemberInfo>(
            "SELECT
                pm.id,
                pm.project_id,
                pm.user_id,
                u.username,
                u.display_name,
                pm.role,
                pm.created_at
             FROM project_members pm
             JOIN users u ON u.id = pm.user_id
             WHERE pm.project_id = $1
             ORDER BY pm.role = 'OWNER' DESC, pm.created_at ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the user belongs to the project.
    pub async fn is_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM project_members WHERE project_id = $1 AND user_id = $2
             )",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Count a project's members.
    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM project_members WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Count a project's members inside an advancement transaction.
    pub async fn count_for_project_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM project_members WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Remove a membership. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
