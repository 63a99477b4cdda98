//! Repository for the `project_files` table (attachment metadata).

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{NewProjectFile, ProjectFile};
use taskdeck_core::types::Timestamp;

const COLUMNS: &str =
    "id, project_id, name, content_type, size_bytes, url, storage_path, uploaded_at";

#[derive(FromRow)]
struct FileRow {
    id: Uuid,
    project_id: Uuid,
    name: String,
    content_type: String,
    size_bytes: i64,
    url: String,
    storage_path: String,
    uploaded_at: Timestamp,
}

impl From<FileRow> for ProjectFile {
    fn from(row: FileRow) -> Self {
        ProjectFile {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            url: row.url,
            storage_path: row.storage_path,
            uploaded_at: row.uploaded_at,
        }
    }
}

pub struct FileRepo;

impl FileRepo {
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &NewProjectFile,
    ) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_files (id, project_id, name, content_type, size_bytes, url, storage_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileRow>(&query)
            .bind(Uuid::new_v4())
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(&input.url)
            .bind(&input.storage_path)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<ProjectFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_files WHERE id = $1");
        sqlx::query_as::<_, FileRow>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    /// Files for one project, newest first.
    pub async fn list_by_project(
        exec: impl PgExecutor<'_>,
        project_id: Uuid,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_files WHERE project_id = $1 ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, FileRow>(&query)
            .bind(project_id)
            .fetch_all(exec)
            .await
            .map(|rows| rows.into_iter().map(Into::into).collect())
    }

    pub async fn delete(exec: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_files WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
