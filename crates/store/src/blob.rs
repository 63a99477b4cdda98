//! The [`BlobStore`] capability trait and its in-memory mock.
//!
//! File attachments store their bytes here and their metadata in the
//! entity store. Deleting a missing object is not an error: a metadata
//! row whose blob is already gone must still be removable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Uniform interface over binary object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `path` and return a downloadable URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Remove the object at `path`. Missing objects are treated as success.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

/// In-memory blob store for offline/demo use and tests.
pub struct MemoryBlobStore {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored objects. Test hook.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://blobs")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        let mut objects = self.objects.write().await;
        objects.insert(path.to_string(), bytes);
        Ok(format!("{}/{}", self.base_url, path))
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut objects = self.objects.write().await;
        objects.remove(path);
        Ok(())
    }
}
