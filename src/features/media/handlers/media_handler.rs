use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::media::dtos::{MediaFile, UploadMediaFormDto, UploadedMediaDto};
use crate::features::media::services::MediaService;
use crate::shared::types::ApiResponse;

/// Upload evidence media
///
/// Accepts multipart/form-data with a single `file` part holding an image
/// or video of at most 10MB. The returned URL can be sent as `media_url`
/// when filing an incident.
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    request_body(
        content = UploadMediaFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Media stored", body = ApiResponse<UploadedMediaDto>),
        (status = 400, description = "Unsupported type, too large, or missing file"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Storage unavailable")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_media(
    user: AuthenticatedUser,
    State(service): State<Arc<MediaService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedMediaDto>>), AppError> {
    let mut file: Option<MediaFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "file" => file = Some(MediaFile::from_field(field).await?),
            other => debug!("Ignoring unknown field: {}", other),
        }
    }

    let file = file
        .filter(|f| !f.is_blank())
        .ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let media = service.upload(&user.sub, file).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(media), None, None)),
    ))
}
