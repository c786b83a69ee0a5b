use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Statuses with a dedicated presentation; the column itself is free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IncidentStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Under Investigation")]
    UnderInvestigation,
    #[serde(rename = "Resolved")]
    Resolved,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 3] = [
        IncidentStatus::Pending,
        IncidentStatus::UnderInvestigation,
        IncidentStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "Pending",
            IncidentStatus::UnderInvestigation => "Under Investigation",
            IncidentStatus::Resolved => "Resolved",
        }
    }

    /// Exact, case-sensitive match on the stored label
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            IncidentStatus::Pending => StatusTone::Warning,
            IncidentStatus::UnderInvestigation => StatusTone::Info,
            IncidentStatus::Resolved => StatusTone::Success,
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge tone clients use when rendering a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Warning,
    Info,
    Success,
    Neutral,
}

impl StatusTone {
    pub fn for_status(status: &str) -> Self {
        IncidentStatus::parse(status)
            .map(|s| s.tone())
            .unwrap_or(StatusTone::Neutral)
    }
}

/// Database model for incident
#[derive(Debug, Clone, FromRow)]
pub struct Incident {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub incident_type: String,
    pub location: String,
    pub media_url: Option<String>,
    pub status: String,
    pub reported_by: String,
    pub created_at: DateTime<Utc>,
}

impl Incident {
    pub fn recognized_status(&self) -> Option<IncidentStatus> {
        IncidentStatus::parse(&self.status)
    }
}

/// Projection used by the personal incident log
#[derive(Debug, Clone, FromRow)]
pub struct IncidentSummary {
    pub id: Uuid,
    pub title: String,
    pub incident_type: String,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Incident> for IncidentSummary {
    fn from(i: &Incident) -> Self {
        Self {
            id: i.id,
            title: i.title.clone(),
            incident_type: i.incident_type.clone(),
            location: i.location.clone(),
            status: i.status.clone(),
            created_at: i.created_at,
        }
    }
}

/// Data for creating a new incident
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub incident_type: String,
    pub location: String,
    pub media_url: Option<String>,
    pub reported_by: String,
}
