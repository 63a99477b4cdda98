//! S3 implementation of [`BlobStore`].

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::blob::BlobStore;
use crate::error::StoreError;

/// Blob store backed by an S3 bucket (or any S3-compatible endpoint the
/// ambient AWS configuration points at).
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    /// Base URL objects are reachable under, e.g. a CDN or the bucket's
    /// public endpoint.
    public_base_url: String,
}

impl S3BlobStore {
    pub fn new(
        client: aws_sdk_s3::Client,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Build a store from the ambient AWS environment (credentials chain,
    /// region) plus the given bucket and public base URL.
    pub async fn from_env(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, public_base_url)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StoreError::Blob(format!("put_object {path}: {e}")))?;
        Ok(format!("{}/{}", self.public_base_url, path))
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        // S3 DeleteObject succeeds for keys that do not exist, which is
        // exactly the tolerance the trait requires.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StoreError::Blob(format!("delete_object {path}: {e}")))?;
        Ok(())
    }
}
