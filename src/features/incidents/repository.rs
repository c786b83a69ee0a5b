//! Persistence for incidents
//!
//! Services depend on the `IncidentRepository` trait; production wires the
//! PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::incidents::models::{Incident, IncidentSummary, NewIncident};

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Insert a report; the store assigns id, status and timestamp
    async fn insert(&self, data: &NewIncident) -> Result<Incident>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Incident>>;

    /// Incidents filed by `reporter`, newest first, optionally narrowed to
    /// an exact status
    async fn list_by_reporter(
        &self,
        reporter: &str,
        status: Option<&str>,
    ) -> Result<Vec<IncidentSummary>>;

    /// Every incident in filing order, oldest first
    async fn list_all(&self) -> Result<Vec<Incident>>;
}

pub struct PgIncidentRepository {
    pool: PgPool,
}

impl PgIncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentRepository for PgIncidentRepository {
    async fn insert(&self, data: &NewIncident) -> Result<Incident> {
        let incident = sqlx::query_as::<_, Incident>(
            r#"
            INSERT INTO incidents (title, description, incident_type, location, media_url, reported_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, incident_type, location, media_url,
                      status, reported_by, created_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.incident_type)
        .bind(&data.location)
        .bind(&data.media_url)
        .bind(&data.reported_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert incident: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(incident)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Incident>> {
        let incident = sqlx::query_as::<_, Incident>(
            r#"
            SELECT id, title, description, incident_type, location, media_url,
                   status, reported_by, created_at
            FROM incidents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(incident)
    }

    async fn list_by_reporter(
        &self,
        reporter: &str,
        status: Option<&str>,
    ) -> Result<Vec<IncidentSummary>> {
        let incidents = sqlx::query_as::<_, IncidentSummary>(
            r#"
            SELECT id, title, incident_type, location, status, created_at
            FROM incidents
            WHERE reported_by = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(reporter)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(incidents)
    }

    async fn list_all(&self) -> Result<Vec<Incident>> {
        let incidents = sqlx::query_as::<_, Incident>(
            r#"
            SELECT id, title, description, incident_type, location, media_url,
                   status, reported_by, created_at
            FROM incidents
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(incidents)
    }
}
