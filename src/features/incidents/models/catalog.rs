//! Fixed option lists offered by the report form.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct IncidentCategory {
    pub slug: &'static str,
    pub label: &'static str,
}

pub const INCIDENT_CATEGORIES: &[IncidentCategory] = &[
    IncidentCategory {
        slug: "unauthorized-entry",
        label: "Unauthorized Entry",
    },
    IncidentCategory {
        slug: "suspicious-activity",
        label: "Suspicious Activity",
    },
    IncidentCategory {
        slug: "theft",
        label: "Theft",
    },
    IncidentCategory {
        slug: "physical-altercation",
        label: "Physical Altercation",
    },
    IncidentCategory {
        slug: "fire-incident",
        label: "Fire Incident",
    },
    IncidentCategory {
        slug: "road-accident",
        label: "Road Accident",
    },
];

pub const CAMPUS_LOCATIONS: &[&str] = &[
    "Main Gate",
    "Library",
    "PGP Auditorium",
    "D Landing",
    "Phase V",
    "Hostel Block",
    "Academic Block",
    "H-Mess",
    "Sports Complex",
    "Faculty Area",
    "Parking Lot",
    "Other (not mentioned)",
];

pub fn find_category(slug: &str) -> Option<&'static IncidentCategory> {
    INCIDENT_CATEGORIES.iter().find(|c| c.slug == slug)
}

/// Display label for an incident type, falling back to the raw value
pub fn category_label(slug: &str) -> String {
    find_category(slug)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| slug.to_string())
}

pub fn is_known_location(location: &str) -> bool {
    CAMPUS_LOCATIONS.contains(&location)
}
