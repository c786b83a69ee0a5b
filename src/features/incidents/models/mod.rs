pub mod catalog;
mod incident;

pub use catalog::{IncidentCategory, CAMPUS_LOCATIONS, INCIDENT_CATEGORIES};
pub use incident::{Incident, IncidentStatus, IncidentSummary, NewIncident, StatusTone};
