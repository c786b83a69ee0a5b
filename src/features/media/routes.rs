use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::media::handlers::upload_media;
use crate::features::media::services::MediaService;
use crate::shared::constants::MAX_UPLOAD_BODY_SIZE;

/// Create routes for the media feature
pub fn routes(media_service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/media/upload",
            post(upload_media).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE)),
        )
        .with_state(media_service)
}
