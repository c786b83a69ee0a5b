use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::incidents::dtos::{
    CreateIncidentDto, IncidentCatalogDto, IncidentListItemDto, IncidentResponseDto,
    ListIncidentsQuery, SubmitIncidentFormDto, SubmitIncidentResponseDto,
};
use crate::features::incidents::services::IncidentService;
use crate::features::media::dtos::MediaFile;
use crate::shared::types::{ApiResponse, Meta};

/// Incident types, campus locations and statuses for the report form
#[utoipa::path(
    get,
    path = "/api/incidents/catalog",
    tag = "incidents",
    responses(
        (status = 200, description = "Form options", body = ApiResponse<IncidentCatalogDto>)
    )
)]
pub async fn get_catalog(
    State(service): State<Arc<IncidentService>>,
) -> Json<ApiResponse<IncidentCatalogDto>> {
    Json(ApiResponse::success(Some(service.catalog()), None, None))
}

/// File an incident report
#[utoipa::path(
    post,
    path = "/api/incidents",
    tag = "incidents",
    request_body = CreateIncidentDto,
    responses(
        (status = 201, description = "Incident filed", body = ApiResponse<IncidentResponseDto>),
        (status = 400, description = "Invalid fields; `focus` names the first one"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_incident(
    user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    AppJson(dto): AppJson<CreateIncidentDto>,
) -> Result<(StatusCode, Json<ApiResponse<IncidentResponseDto>>)> {
    let incident = service.create(&user, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(incident),
            Some("Incident reported successfully".to_string()),
            None,
        )),
    ))
}

/// File an incident report together with optional evidence
///
/// Accepts multipart/form-data with text parts `title`, `description`,
/// `incident_type`, `location` and an optional `media` file part.
#[utoipa::path(
    post,
    path = "/api/incidents/submit",
    tag = "incidents",
    request_body(
        content = SubmitIncidentFormDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Incident filed; `media_warning` is set when evidence was not stored", body = ApiResponse<SubmitIncidentResponseDto>),
        (status = 400, description = "Invalid fields; `focus` names the first one"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_incident(
    user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmitIncidentResponseDto>>)> {
    let mut dto = CreateIncidentDto::default();
    let mut media: Option<MediaFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "media" {
            media = Some(MediaFile::from_field(field).await?);
            continue;
        }

        let target = match field_name.as_str() {
            "title" => &mut dto.title,
            "description" => &mut dto.description,
            "incident_type" => &mut dto.incident_type,
            "location" => &mut dto.location,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
                continue;
            }
        };
        *target = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
        })?;
    }

    let result = service
        .submit(&user, dto, media.filter(|m| !m.is_blank()))
        .await?;

    let message = match &result.media_warning {
        Some(_) => "Incident reported, but the media could not be attached",
        None => "Incident reported successfully",
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(result),
            Some(message.to_string()),
            None,
        )),
    ))
}

/// List the caller's own incidents, newest first
#[utoipa::path(
    get,
    path = "/api/incidents",
    tag = "incidents",
    params(ListIncidentsQuery),
    responses(
        (status = 200, description = "Caller's incidents", body = ApiResponse<Vec<IncidentListItemDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_incidents(
    user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    AppQuery(query): AppQuery<ListIncidentsQuery>,
) -> Result<Json<ApiResponse<Vec<IncidentListItemDto>>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let incidents = service.list_for_user(&user, &query).await?;
    let total = incidents.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(incidents),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single incident
///
/// Reporters see their own incidents; security staff see all of them.
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    tag = "incidents",
    params(
        ("id" = Uuid, Path, description = "Incident ID")
    ),
    responses(
        (status = 200, description = "Incident found", body = ApiResponse<IncidentResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Incident not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_incident(
    user: AuthenticatedUser,
    State(service): State<Arc<IncidentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IncidentResponseDto>>> {
    let incident = service.get_for_user(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(incident), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::incidents::dtos::{
        IncidentListItemDto, IncidentResponseDto, SubmitIncidentResponseDto,
    };
    use crate::features::incidents::{routes, IncidentService};
    use crate::features::media::MediaService;
    use crate::shared::test_helpers::{
        create_user, sample_incident, with_user, InMemoryIncidentRepository, InMemoryStorage,
    };
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn service(repository: InMemoryIncidentRepository) -> Arc<IncidentService> {
        let media = Arc::new(MediaService::new(Arc::new(InMemoryStorage::default())));
        Arc::new(IncidentService::new(Arc::new(repository), media))
    }

    fn server_for(sub: &str, repository: InMemoryIncidentRepository) -> TestServer {
        let service = service(repository);
        let app = Router::new()
            .merge(with_user(
                routes::protected_routes(service.clone()),
                create_user(sub),
            ))
            .merge(routes::public_routes(service));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_catalog_is_public() {
        let server = TestServer::new(routes::public_routes(service(
            InMemoryIncidentRepository::default(),
        )))
        .unwrap();

        let response = server.get("/api/incidents/catalog").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["incident_types"].as_array().unwrap().len(), 6);
        assert_eq!(body["data"]["locations"][0], "Main Gate");
        assert_eq!(body["data"]["statuses"][1], "Under Investigation");
    }

    #[tokio::test]
    async fn test_create_incident_returns_created() {
        let server = server_for("reporter-1", InMemoryIncidentRepository::default());

        let response = server
            .post("/api/incidents")
            .json(&json!({
                "title": "Fight near mess",
                "description": "Two students were fighting outside H-Mess",
                "incident_type": "physical-altercation",
                "location": "H-Mess"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<IncidentResponseDto> = response.json();
        let incident = body.data.unwrap();
        assert_eq!(incident.status, "Pending");
        assert_eq!(incident.reported_by, "reporter-1");
    }

    #[tokio::test]
    async fn test_create_incident_reports_focus_field() {
        let server = server_for("reporter-1", InMemoryIncidentRepository::default());

        let response = server
            .post("/api/incidents")
            .json(&json!({
                "title": "Fight near mess",
                "description": "Too short",
                "incident_type": "",
                "location": "H-Mess"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert_eq!(body.focus.as_deref(), Some("description"));
        assert_eq!(
            body.message.as_deref(),
            Some("Please provide more details (at least 20 characters)")
        );
        assert_eq!(body.errors.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_incident_with_media() {
        let server = server_for("reporter-1", InMemoryIncidentRepository::default());
        let form = MultipartForm::new()
            .add_text("title", "Smoke from lab")
            .add_text("description", "Thick smoke coming out of the chemistry lab")
            .add_text("incident_type", "fire-incident")
            .add_text("location", "Academic Block")
            .add_part(
                "media",
                Part::bytes(vec![9u8; 16])
                    .file_name("smoke.png")
                    .mime_type("image/png"),
            );

        let response = server.post("/api/incidents/submit").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<SubmitIncidentResponseDto> = response.json();
        let result = body.data.unwrap();
        assert!(result.media_warning.is_none());
        assert!(result.incident.media_url.unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn test_submit_incident_files_report_when_media_is_too_large() {
        let repository = Arc::new(InMemoryIncidentRepository::default());
        let storage = Arc::new(InMemoryStorage::default());
        let media = Arc::new(MediaService::new(storage.clone()));
        let service = Arc::new(IncidentService::new(repository.clone(), media));
        let server = TestServer::new(with_user(
            routes::protected_routes(service),
            create_user("reporter-1"),
        ))
        .unwrap();

        // Text parts after the file must still be read
        let form = MultipartForm::new()
            .add_part(
                "media",
                Part::bytes(vec![0u8; 12 * 1024 * 1024])
                    .file_name("cctv.mp4")
                    .mime_type("video/mp4"),
            )
            .add_text("title", "Bike taken from stand")
            .add_text("description", "My bicycle was taken from the hostel stand")
            .add_text("incident_type", "theft")
            .add_text("location", "Hostel Block");

        let response = server.post("/api/incidents/submit").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<SubmitIncidentResponseDto> = response.json();
        let result = body.data.unwrap();
        assert_eq!(
            result.media_warning.as_deref(),
            Some("File is too large. Maximum size is 10MB.")
        );
        assert!(result.incident.media_url.is_none());
        assert_eq!(repository.all().await.len(), 1);
        assert!(storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_incidents_returns_only_own_with_total() {
        let repository = InMemoryIncidentRepository::with(vec![
            sample_incident("alice", "Laptop stolen", "Pending", 2),
            sample_incident("alice", "Car scratched", "Resolved", 1),
            sample_incident("bob", "Wallet stolen", "Pending", 1),
        ]);
        let server = server_for("alice", repository);

        let response = server
            .get("/api/incidents")
            .add_query_param("search", "stolen")
            .await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<IncidentListItemDto>> = response.json();
        assert_eq!(body.meta.unwrap().total, 1);
        assert_eq!(body.data.unwrap()[0].title, "Laptop stolen");
    }

    #[tokio::test]
    async fn test_get_incident_of_other_user_is_not_found() {
        let incident = sample_incident("bob", "Wallet stolen", "Pending", 1);
        let id = incident.id;
        let server = server_for("alice", InMemoryIncidentRepository::with(vec![incident]));

        let response = server
            .get(&format!("/api/incidents/{}", id))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
