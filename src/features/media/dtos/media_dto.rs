use axum::extract::multipart::Field;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::MAX_MEDIA_SIZE;
use crate::shared::validation::MEDIA_MIME_REGEX;

pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "Unsupported file type. Please upload an image or video.";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File is too large. Maximum size is 10MB.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Upload form for evidence media.
/// Note: documentation only; the handler reads the multipart stream itself.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaFormDto {
    /// Image or video, at most 10MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Stored evidence file
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedMediaDto {
    /// Object key inside the bucket
    pub key: String,
    /// Anonymous URL to store on the incident
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub file_size: i64,
}

/// A file part read from a multipart request
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// The part exceeded `MAX_MEDIA_SIZE`; `data` was not kept
    pub oversized: bool,
}

impl MediaFile {
    /// Read a file part into memory.
    ///
    /// Buffering stops once the part passes `MAX_MEDIA_SIZE`; the rest is
    /// drained so the parts after it can still be read.
    pub async fn from_field(mut field: Field<'_>) -> Result<Self, AppError> {
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();

        let mut data = Vec::new();
        let mut oversized = false;

        while let Some(chunk) = field.chunk().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })? {
            if oversized {
                continue;
            }
            if data.len() + chunk.len() > MAX_MEDIA_SIZE {
                debug!("Media part '{}' is over the size limit", file_name);
                oversized = true;
                data = Vec::new();
                continue;
            }
            data.extend_from_slice(&chunk);
        }

        Ok(Self {
            file_name,
            content_type,
            data,
            oversized,
        })
    }

    /// Browsers send an empty, unnamed part when no file was picked
    pub fn is_blank(&self) -> bool {
        !self.oversized && self.data.is_empty() && self.file_name.is_empty()
    }

    /// Check type first, then size
    pub fn check(&self) -> Result<MediaKind, AppError> {
        let content_type = self.content_type.to_ascii_lowercase();
        if !MEDIA_MIME_REGEX.is_match(&content_type) {
            return Err(AppError::BadRequest(UNSUPPORTED_TYPE_MESSAGE.to_string()));
        }
        if self.oversized || self.data.len() > MAX_MEDIA_SIZE {
            return Err(AppError::BadRequest(FILE_TOO_LARGE_MESSAGE.to_string()));
        }
        if self.data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        Ok(if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        })
    }

    /// Extension for the stored object
    pub fn extension(&self) -> String {
        let subtype = self
            .content_type
            .to_ascii_lowercase()
            .split_once('/')
            .map(|(_, s)| s.to_string())
            .unwrap_or_default();

        match subtype.as_str() {
            "jpeg" | "pjpeg" => return "jpg".to_string(),
            "svg+xml" => return "svg".to_string(),
            "quicktime" => return "mov".to_string(),
            "x-matroska" => return "mkv".to_string(),
            "x-msvideo" => return "avi".to_string(),
            _ => {}
        }

        if !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
            return subtype;
        }

        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".to_string())
    }
}
