//! Repository for the `task_notes` table (task-level annotations).

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{CreateTaskNote, TaskNote};
use taskdeck_core::types::Timestamp;

const COLUMNS: &str = "id, task_id, content, created_at";

#[derive(FromRow)]
struct TaskNoteRow {
    id: Uuid,
    task_id: Uuid,
    content: String,
    created_at: Timestamp,
}

impl From<TaskNoteRow> for TaskNote {
    fn from(row: TaskNoteRow) -> Self {
        TaskNote {
            id: row.id,
            task_id: row.task_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

pub struct TaskNoteRepo;

impl TaskNoteRepo {
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateTaskNote,
    ) -> Result<TaskNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_notes (id, task_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskNoteRow>(&query)
            .bind(Uuid::new_v4())
            .bind(input.task_id)
            .bind(&input.content)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<TaskNote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_notes WHERE id = $1");
        sqlx::query_as::<_, TaskNoteRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Notes for one task, newest first.
    pub async fn list_by_task(
        exec: impl PgExecutor<'_>,
        task_id: Uuid,
    ) -> Result<Vec<TaskNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_notes WHERE task_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TaskNoteRow>(&query)
            .bind(task_id)
            .fetch_all(exec)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    pub async fn delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_notes WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
