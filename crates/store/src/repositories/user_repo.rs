//! Repository for the `users` table.

use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use taskdeck_core::entities::{NewUser, User};
use taskdeck_core::types::Timestamp;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "uid, name, email, password_hash, created_at";

#[derive(FromRow)]
struct UserRow {
    uid: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            uid: row.uid,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. The unique constraint
    /// on `email` surfaces duplicate signups as a database error.
    pub async fn create(exec: impl PgExecutor<'_>, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (uid, name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(exec)
            .await
            .map(Into::into)
    }

    pub async fn find_by_email(
        exec: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }

    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        uid: Uuid,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE uid = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(uid)
            .fetch_optional(exec)
            .await
            .map(|row| row.map(Into::into))
    }
}
