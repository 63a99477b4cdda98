use taskdeck_core::error::CoreError;

/// Error type returned by every [`EntityStore`](crate::EntityStore) and
/// [`BlobStore`](crate::BlobStore) operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain error (not-found, permission denied, validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A blob storage provider error.
    #[error("Blob storage error: {0}")]
    Blob(String),
}

impl StoreError {
    pub fn permission_denied() -> Self {
        StoreError::Core(CoreError::PermissionDenied)
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::Core(CoreError::not_found(entity, id))
    }
}
