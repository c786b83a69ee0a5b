use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::incidents::handlers;
use crate::features::incidents::services::IncidentService;
use crate::shared::constants::MAX_UPLOAD_BODY_SIZE;

/// Routes that need the auth middleware applied by the caller
pub fn protected_routes(incident_service: Arc<IncidentService>) -> Router {
    Router::new()
        .route(
            "/api/incidents",
            get(handlers::list_incidents).post(handlers::create_incident),
        )
        .route(
            "/api/incidents/submit",
            post(handlers::submit_incident).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE)),
        )
        .route("/api/incidents/{id}", get(handlers::get_incident))
        .with_state(incident_service)
}

/// Routes available without a token
pub fn public_routes(incident_service: Arc<IncidentService>) -> Router {
    Router::new()
        .route("/api/incidents/catalog", get(handlers::get_catalog))
        .with_state(incident_service)
}
