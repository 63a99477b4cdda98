//! Project file attachment metadata.
//!
//! Only metadata lives in the entity store; the bytes themselves go through
//! the blob store. Deleting a file removes both.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{EntityId, Timestamp};

/// Metadata for a binary attachment on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Downloadable URL returned by the blob store at upload time.
    pub url: String,
    /// Blob-store key, kept so deletion can remove the object.
    #[serde(skip_serializing, default)]
    pub storage_path: String,
    pub uploaded_at: Timestamp,
}

/// Input recording the metadata of an uploaded blob.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProjectFile {
    pub project_id: EntityId,
    #[validate(length(min = 1, message = "file name is required"))]
    pub name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub url: String,
    pub storage_path: String,
}
