//! Repository for the `tasks` table.
//!
//! `status` is stored as TEXT in its stable snake_case form; rows with an
//! unrecognized status fail row decoding rather than silently defaulting.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{CreateTask, Task, TaskStatus, UpdateTask};
use taskdeck_core::types::Timestamp;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, created_at";

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    project_id: Uuid,
    title: String,
    description: String,
    status: String,
    created_at: Timestamp,
}

impl TryFrom<TaskRow> for Task {
    type Error = sqlx::Error;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status: TaskStatus = row
            .status
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(e.into()))?;
        Ok(Task {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status,
            created_at: row.created_at,
        })
    }
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, sqlx::Error> {
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task. Status defaults to `to_do` when the input omits it.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let status = input.status.unwrap_or(TaskStatus::ToDo);
        let query = format!(
            "INSERT INTO tasks (id, project_id, title, description, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(Uuid::new_v4())
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(status.as_str())
            .fetch_one(exec)
            .await?
            .try_into()
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    /// Tasks for one project, oldest first.
    pub async fn list_by_project(
        exec: impl PgExecutor<'_>,
        project_id: Uuid,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at");
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(project_id)
            .fetch_all(exec)
            .await?;
        rows_to_tasks(rows)
    }

    /// All tasks across every project owned by one user, oldest first.
    pub async fn list_for_owner(
        exec: impl PgExecutor<'_>,
        owner: Uuid,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT t.{}
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.owner_uid = $1
             ORDER BY t.created_at",
            COLUMNS.replace(", ", ", t.")
        );
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(owner)
            .fetch_all(exec)
            .await?;
        rows_to_tasks(rows)
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.map(TaskStatus::as_str))
            .fetch_optional(exec)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    /// Set just the board status.
    pub async fn set_status(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("UPDATE tasks SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(exec)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    /// Delete a task. Its task-notes are removed by the foreign-key cascade.
    pub async fn delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
