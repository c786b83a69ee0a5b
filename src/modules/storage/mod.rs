//! Storage module for evidence media
//!
//! Provides the `ObjectStorage` seam used by the media feature and its
//! MinIO/S3-compatible implementation.

mod minio_client;
mod sigv4;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;

/// Object storage holding publicly readable evidence files
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key`, returning the key
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    /// Remove the object stored under `key`
    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Full key for `path` inside the publicly readable prefix
    fn public_key(&self, path: &str) -> String;

    /// URL at which `key` can be fetched without credentials
    fn public_url(&self, key: &str) -> String;
}
