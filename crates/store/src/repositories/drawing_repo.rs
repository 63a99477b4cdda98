//! Repository for the `drawings` table. Rows are soft-deleted via the
//! `deleted` flag, never removed.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{CreateDrawing, Drawing};
use taskdeck_core::types::Timestamp;

const COLUMNS: &str = "id, user_id, name, records, created_at, updated_at, deleted";

#[derive(FromRow)]
struct DrawingRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    records: serde_json::Value,
    created_at: Timestamp,
    updated_at: Timestamp,
    deleted: bool,
}

impl From<DrawingRow> for Drawing {
    fn from(row: DrawingRow) -> Self {
        Drawing {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            records: row.records,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted: row.deleted,
        }
    }
}

pub struct DrawingRepo;

impl DrawingRepo {
    pub async fn create(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
        input: &CreateDrawing,
    ) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (id, user_id, name, records)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrawingRow>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.records)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    /// Look up a drawing by id, including soft-deleted rows.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = $1");
        sqlx::query_as::<_, DrawingRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Drawings for one user, oldest first. Excludes soft-deleted rows.
    pub async fn list_for_user(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<Vec<Drawing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drawings
             WHERE user_id = $1 AND deleted = FALSE
             ORDER BY created_at"
        );
        sqlx::query_as::<_, DrawingRow>(&query)
            .bind(user_id)
            .fetch_all(exec)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    /// Replace the canvas snapshot and bump `updated_at`.
    pub async fn update_records(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        records: &serde_json::Value,
    ) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!(
            "UPDATE drawings SET records = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrawingRow>(&query)
            .bind(id)
            .bind(records)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Soft-delete a drawing. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE drawings SET deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
