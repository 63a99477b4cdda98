//! Repository for the `projects` table.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{CreateProject, Project, UpdateProject};
use taskdeck_core::types::Timestamp;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, start_date, end_date, owner_uid, share_id, \
                       is_public, image_url, created_at";

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    start_date: Timestamp,
    end_date: Timestamp,
    owner_uid: Uuid,
    share_id: Option<String>,
    is_public: bool,
    image_url: Option<String>,
    created_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            owner_uid: row.owner_uid,
            share_id: row.share_id,
            is_public: row.is_public,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for the given owner, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        owner: Uuid,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (id, name, description, start_date, end_date, owner_uid, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(owner)
            .bind(&input.image_url)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Projects belonging to one owner, oldest first.
    pub async fn list_for_owner(
        exec: impl PgExecutor<'_>,
        owner: Uuid,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE owner_uid = $1 ORDER BY created_at");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(owner)
            .fetch_all(exec)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                image_url = COALESCE($6, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.image_url)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Delete a project row. Children are removed by the foreign-key
    /// cascades declared in the schema, inside the caller's transaction.
    pub async fn delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the share id and mark the project public.
    pub async fn set_sharing(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        share_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET share_id = COALESCE(share_id, $2), is_public = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(share_id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Look up a public project by its share id.
    pub async fn find_public_by_share_id(
        exec: impl PgExecutor<'_>,
        share_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE share_id = $1 AND is_public = TRUE");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(share_id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }
}
