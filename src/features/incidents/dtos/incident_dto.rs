use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::incidents::models::{
    catalog, Incident, IncidentCategory, IncidentStatus, IncidentSummary, NewIncident, StatusTone,
    CAMPUS_LOCATIONS, INCIDENT_CATEGORIES,
};
use crate::features::media::dtos::UploadedMediaDto;
use crate::shared::validation::FieldErrors;

pub const MIN_TITLE_LENGTH: usize = 5;
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Order in which the report form presents its inputs
pub const FORM_FIELD_ORDER: &[&str] = &[
    "title",
    "description",
    "incident_type",
    "location",
    "media_url",
];

/// Filter value meaning "no status filter"
pub const ALL_STATUSES: &str = "All";

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if trimmed_len(title) < MIN_TITLE_LENGTH {
        return Err(invalid(
            "title_length",
            "Title must be at least 5 characters long",
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if trimmed_len(description) < MIN_DESCRIPTION_LENGTH {
        return Err(invalid(
            "description_length",
            "Please provide more details (at least 20 characters)",
        ));
    }
    Ok(())
}

fn validate_incident_type(incident_type: &str) -> Result<(), ValidationError> {
    if catalog::find_category(incident_type).is_none() {
        return Err(invalid("incident_type", "Please select an incident type"));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    if !catalog::is_known_location(location) {
        return Err(invalid("location", "Please select a location"));
    }
    Ok(())
}

/// Request DTO for filing an incident
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateIncidentDto {
    /// At least 5 characters once trimmed
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Unknown person near hostel")]
    pub title: String,

    /// At least 20 characters once trimmed
    #[serde(default)]
    #[validate(custom(function = "validate_description"))]
    pub description: String,

    /// Slug from the incident catalog
    #[serde(default)]
    #[validate(custom(function = "validate_incident_type"))]
    #[schema(example = "suspicious-activity")]
    pub incident_type: String,

    /// One of the campus locations from the catalog
    #[serde(default)]
    #[validate(custom(function = "validate_location"))]
    #[schema(example = "Hostel Block")]
    pub location: String,

    /// Public URL returned by the media upload endpoint
    #[serde(default)]
    #[validate(url(message = "Media URL must be a valid URL"))]
    pub media_url: Option<String>,
}

impl CreateIncidentDto {
    /// Validate every field, returning failures in form order
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate()
            .map_err(|e| FieldErrors::from_validation(&e, FORM_FIELD_ORDER))
    }

    /// Build the insert payload; text fields are stored trimmed
    pub fn into_new_incident(self, reported_by: &str) -> NewIncident {
        NewIncident {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            incident_type: self.incident_type,
            location: self.location,
            media_url: self
                .media_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
            reported_by: reported_by.to_string(),
        }
    }
}

/// Multipart form for filing an incident together with its evidence.
/// Note: documentation only; the handler reads the multipart stream itself.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitIncidentFormDto {
    pub title: String,
    pub description: String,
    #[schema(example = "theft")]
    pub incident_type: String,
    #[schema(example = "Library")]
    pub location: String,
    /// Optional image or video, at most 10MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub media: Option<String>,
}

/// Query parameters for the personal incident log
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListIncidentsQuery {
    /// Case-insensitive substring of the title
    #[validate(length(max = 200, message = "Search text is too long"))]
    pub search: Option<String>,
    /// Exact status, or "All"
    #[param(example = "Pending")]
    pub status: Option<String>,
}

impl ListIncidentsQuery {
    /// Status to filter on, `None` when every status is wanted
    pub fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ALL_STATUSES)
    }

    /// Lowercased search needle, `None` when blank
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Full incident as shown on the detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncidentResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub incident_type: String,
    pub incident_type_label: String,
    pub location: String,
    pub media_url: Option<String>,
    pub status: String,
    pub status_tone: StatusTone,
    pub reported_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<Incident> for IncidentResponseDto {
    fn from(i: Incident) -> Self {
        Self {
            id: i.id,
            incident_type_label: catalog::category_label(&i.incident_type),
            status_tone: StatusTone::for_status(&i.status),
            title: i.title,
            description: i.description,
            incident_type: i.incident_type,
            location: i.location,
            media_url: i.media_url,
            status: i.status,
            reported_by: i.reported_by,
            created_at: i.created_at,
        }
    }
}

/// Row of the personal incident log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncidentListItemDto {
    pub id: Uuid,
    pub title: String,
    pub incident_type: String,
    pub incident_type_label: String,
    pub location: String,
    pub status: String,
    pub status_tone: StatusTone,
    pub created_at: DateTime<Utc>,
}

impl From<IncidentSummary> for IncidentListItemDto {
    fn from(i: IncidentSummary) -> Self {
        Self {
            id: i.id,
            incident_type_label: catalog::category_label(&i.incident_type),
            status_tone: StatusTone::for_status(&i.status),
            title: i.title,
            incident_type: i.incident_type,
            location: i.location,
            status: i.status,
            created_at: i.created_at,
        }
    }
}

/// Result of a multipart submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitIncidentResponseDto {
    pub incident: IncidentResponseDto,
    /// Stored evidence, when an upload succeeded
    pub media: Option<UploadedMediaDto>,
    /// Set when the evidence could not be stored; the report was still filed
    pub media_warning: Option<String>,
}

/// Option lists for the report form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IncidentCatalogDto {
    pub incident_types: Vec<IncidentCategory>,
    pub locations: Vec<&'static str>,
    pub statuses: Vec<&'static str>,
}

impl IncidentCatalogDto {
    pub fn current() -> Self {
        Self {
            incident_types: INCIDENT_CATEGORIES.to_vec(),
            locations: CAMPUS_LOCATIONS.to_vec(),
            statuses: IncidentStatus::ALL.iter().map(|s| s.as_str()).collect(),
        }
    }
}
