use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::media::dtos::{MediaFile, UploadedMediaDto};
use crate::modules::storage::ObjectStorage;

/// Service for evidence uploads
pub struct MediaService {
    storage: Arc<dyn ObjectStorage>,
}

impl MediaService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Validate and store a file under the reporter's public folder
    pub async fn upload(&self, reporter: &str, file: MediaFile) -> Result<UploadedMediaDto> {
        let kind = file.check()?;

        let path = format!(
            "incidents/{}/{}.{}",
            path_segment(reporter),
            Uuid::now_v7(),
            file.extension()
        );
        let key = self.storage.public_key(&path);
        let file_size = file.data.len() as i64;
        let content_type = file.content_type.to_ascii_lowercase();

        let key = self.storage.upload(&key, file.data, &content_type).await?;
        let url = self.storage.public_url(&key);

        info!(
            "Stored evidence: key={}, type={}, size={}",
            key, content_type, file_size
        );

        Ok(UploadedMediaDto {
            key,
            url,
            content_type,
            kind,
            file_size,
        })
    }

    /// Remove a stored file; failures are only logged
    pub async fn discard(&self, key: &str) {
        match self.storage.delete(key).await {
            Ok(()) => debug!("Discarded evidence: {}", key),
            Err(e) => warn!("Failed to discard evidence '{}': {}", key, e),
        }
    }
}

/// Subjects may contain characters that are awkward in object keys
fn path_segment(value: &str) -> String {
    let segment: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if segment.is_empty() {
        "anonymous".to_string()
    } else {
        segment
    }
}
