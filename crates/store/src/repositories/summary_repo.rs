//! Repository for the `summaries` table. One row per user, overwritten on
//! each regeneration.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::Summary;
use taskdeck_core::types::Timestamp;

const COLUMNS: &str = "uid, summary, updated_at";

#[derive(FromRow)]
struct SummaryRow {
    uid: Uuid,
    summary: String,
    updated_at: Timestamp,
}

impl From<SummaryRow> for Summary {
    fn from(row: SummaryRow) -> Self {
        Summary {
            uid: row.uid,
            summary: row.summary,
            updated_at: row.updated_at,
        }
    }
}

pub struct SummaryRepo;

impl SummaryRepo {
    /// Insert or overwrite the user's summary.
    pub async fn upsert(
        exec: impl PgExecutor<'_>,
        uid: Uuid,
        text: &str,
    ) -> Result<Summary, sqlx::Error> {
        let query = format!(
            "INSERT INTO summaries (uid, summary, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (uid) DO UPDATE SET summary = EXCLUDED.summary, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SummaryRow>(&query)
            .bind(uid)
            .bind(text)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_uid(
        exec: impl PgExecutor<'_>,
        uid: Uuid,
    ) -> Result<Option<Summary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM summaries WHERE uid = $1");
        sqlx::query_as::<_, SummaryRow>(&query)
            .bind(uid)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }
}
