use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::incidents::{
    dtos as incidents_dtos, handlers as incidents_handlers, models as incidents_models,
};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Incidents
        incidents_handlers::get_catalog,
        incidents_handlers::create_incident,
        incidents_handlers::submit_incident,
        incidents_handlers::list_incidents,
        incidents_handlers::get_incident,
        // Media
        media_handlers::upload_media,
        // Dashboard
        dashboard_handlers::get_dashboard,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Incidents
            incidents_models::IncidentStatus,
            incidents_models::StatusTone,
            incidents_models::IncidentCategory,
            incidents_dtos::CreateIncidentDto,
            incidents_dtos::SubmitIncidentFormDto,
            incidents_dtos::IncidentResponseDto,
            incidents_dtos::IncidentListItemDto,
            incidents_dtos::SubmitIncidentResponseDto,
            incidents_dtos::IncidentCatalogDto,
            ApiResponse<incidents_dtos::IncidentResponseDto>,
            ApiResponse<Vec<incidents_dtos::IncidentListItemDto>>,
            ApiResponse<incidents_dtos::SubmitIncidentResponseDto>,
            ApiResponse<incidents_dtos::IncidentCatalogDto>,
            // Media
            media_dtos::MediaKind,
            media_dtos::UploadMediaFormDto,
            media_dtos::UploadedMediaDto,
            ApiResponse<media_dtos::UploadedMediaDto>,
            // Dashboard
            dashboard_dtos::TimeRange,
            dashboard_dtos::StatusCountDto,
            dashboard_dtos::StatusSummaryDto,
            dashboard_dtos::StatusSliceDto,
            dashboard_dtos::TypeShareDto,
            dashboard_dtos::LocationCountDto,
            dashboard_dtos::TrendPointDto,
            dashboard_dtos::RecentIncidentDto,
            dashboard_dtos::DashboardDto,
            ApiResponse<dashboard_dtos::DashboardDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current user and session check"),
        (name = "incidents", description = "Filing and reading incident reports"),
        (name = "media", description = "Evidence image and video uploads"),
        (name = "dashboard", description = "Campus-wide incident analytics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "KGuardian API",
        version = "0.1.0",
        description = "API documentation for KGuardian campus safety reporting",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
