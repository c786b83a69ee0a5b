use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardDto, TimeRange};
use crate::features::dashboard::services::aggregation;
use crate::features::incidents::IncidentRepository;

/// Service for the analytics dashboard
pub struct DashboardService {
    repository: Arc<dyn IncidentRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn IncidentRepository>) -> Self {
        Self { repository }
    }

    /// Aggregate a fresh snapshot of every incident
    pub async fn get_dashboard(&self, range: TimeRange) -> Result<DashboardDto> {
        let incidents = self.repository.list_all().await?;
        let dashboard = aggregation::build_dashboard(&incidents, range, Utc::now());

        debug!(
            "Dashboard built: incidents={}, range={:?}, trend_days={}",
            incidents.len(),
            range,
            dashboard.trend.len()
        );

        Ok(dashboard)
    }
}
