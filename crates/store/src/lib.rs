//! Taskdeck access layer.
//!
//! Presents one uniform CRUD-shaped interface per entity type behind the
//! [`EntityStore`] capability trait, with two interchangeable
//! implementations selected once at startup:
//!
//! - [`PgStore`] — PostgreSQL via sqlx, delegating to the per-entity
//!   modules under [`repositories`].
//! - [`MemoryStore`] — an in-memory mock enforcing the same owner-uid
//!   checks, for offline/demo use and for tests.
//!
//! Binary attachments go through the separate [`BlobStore`] trait
//! ([`S3BlobStore`] or [`MemoryBlobStore`]).

pub mod blob;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod s3;
pub mod store;

pub use blob::{BlobStore, MemoryBlobStore};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use s3::S3BlobStore;
pub use store::EntityStore;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from the crate's `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
