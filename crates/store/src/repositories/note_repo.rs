//! Repository for the `notes` table (project-level annotations).

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{CreateNote, Note};
use taskdeck_core::types::Timestamp;

const COLUMNS: &str = "id, project_id, content, created_at";

#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    project_id: Uuid,
    content: String,
    created_at: Timestamp,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            project_id: row.project_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

pub struct NoteRepo;

impl NoteRepo {
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (id, project_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(Uuid::new_v4())
            .bind(input.project_id)
            .bind(&input.content)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Notes for one project, newest first.
    pub async fn list_by_project(
        exec: impl PgExecutor<'_>,
        project_id: Uuid,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(project_id)
            .fetch_all(exec)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    pub async fn update_content(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        content: &str,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("UPDATE notes SET content = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    pub async fn delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
