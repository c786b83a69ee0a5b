use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::incidents::models::{IncidentStatus, StatusTone};

// ============================================================================
// Query
// ============================================================================

/// Window applied to the trend series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 7 days
    Week,
    /// Since the same instant one calendar month ago
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Inclusive lower bound of the window, `None` for all time
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Week => Some(now - chrono::Duration::days(7)),
            TimeRange::Month => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            TimeRange::All => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `week`, `month` or `all` (default)
    #[serde(default)]
    #[param(inline)]
    pub range: TimeRange,
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub count: i64,
    /// Share of all incidents, one decimal
    pub percent: f64,
}

/// Stat cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusSummaryDto {
    pub total: i64,
    pub pending: StatusCountDto,
    pub under_investigation: StatusCountDto,
    pub resolved: StatusCountDto,
    /// Incidents whose status is none of the recognised ones
    pub other: i64,
}

/// Slice of the status pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusSliceDto {
    pub status: IncidentStatus,
    pub count: i64,
    pub percent: f64,
    pub tone: StatusTone,
}

// ============================================================================
// Breakdowns
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TypeShareDto {
    pub incident_type: String,
    pub label: String,
    pub count: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationCountDto {
    pub location: String,
    pub count: i64,
}

/// Incidents per UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrendPointDto {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentIncidentDto {
    pub id: Uuid,
    pub title: String,
    pub incident_type: String,
    pub incident_type_label: String,
    pub location: String,
    pub status: String,
    pub status_tone: StatusTone,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Chart-ready analytics over every incident
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub range: TimeRange,
    pub generated_at: DateTime<Utc>,
    pub summary: StatusSummaryDto,
    pub status_chart: Vec<StatusSliceDto>,
    pub type_chart: Vec<TypeShareDto>,
    /// Top locations, busiest first
    pub location_chart: Vec<LocationCountDto>,
    /// Only this series honours `range`
    pub trend: Vec<TrendPointDto>,
    pub recent: Vec<RecentIncidentDto>,
}
