use std::collections::HashMap;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::{Duration, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::incidents::models::{Incident, IncidentSummary, NewIncident};
use crate::features::incidents::IncidentRepository;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::ROLE_SECURITY_OFFICER;

pub fn create_user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        account_id: format!("{}-account", sub),
        sub: sub.to_string(),
        session_uid: Some("test-session-uid".to_string()),
        roles: Vec::new(),
    }
}

pub fn create_staff_user() -> AuthenticatedUser {
    AuthenticatedUser {
        roles: vec![ROLE_SECURITY_OFFICER.to_string()],
        ..create_user("staff-sub")
    }
}

/// Layer that authenticates every request as `user`
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

/// Incident filed by `reporter` `hours_ago` hours before now
pub fn sample_incident(reporter: &str, title: &str, status: &str, hours_ago: i64) -> Incident {
    Incident {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: Sentence(6..12).fake(),
        incident_type: "theft".to_string(),
        location: "Library".to_string(),
        media_url: None,
        status: status.to_string(),
        reported_by: reporter.to_string(),
        created_at: Utc::now() - Duration::hours(hours_ago),
    }
}

#[derive(Default)]
pub struct InMemoryIncidentRepository {
    incidents: RwLock<Vec<Incident>>,
    fail_inserts: bool,
}

impl InMemoryIncidentRepository {
    pub fn with(incidents: Vec<Incident>) -> Self {
        Self {
            incidents: RwLock::new(incidents),
            fail_inserts: false,
        }
    }

    /// Repository whose inserts always fail
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub async fn all(&self) -> Vec<Incident> {
        self.incidents.read().await.clone()
    }

    fn newest_first(mut incidents: Vec<Incident>) -> Vec<Incident> {
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        incidents
    }

    fn oldest_first(mut incidents: Vec<Incident>) -> Vec<Incident> {
        incidents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        incidents
    }
}

#[async_trait]
impl IncidentRepository for InMemoryIncidentRepository {
    async fn insert(&self, data: &NewIncident) -> Result<Incident> {
        if self.fail_inserts {
            return Err(AppError::Internal("insert failed".to_string()));
        }

        let incident = Incident {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            incident_type: data.incident_type.clone(),
            location: data.location.clone(),
            media_url: data.media_url.clone(),
            status: "Pending".to_string(),
            reported_by: data.reported_by.clone(),
            created_at: Utc::now(),
        };
        self.incidents.write().await.push(incident.clone());
        Ok(incident)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Incident>> {
        Ok(self
            .incidents
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_by_reporter(
        &self,
        reporter: &str,
        status: Option<&str>,
    ) -> Result<Vec<IncidentSummary>> {
        let incidents = Self::newest_first(self.all().await);
        Ok(incidents
            .iter()
            .filter(|i| i.reported_by == reporter)
            .filter(|i| match status {
                Some(s) => i.status == s,
                None => true,
            })
            .map(IncidentSummary::from)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Incident>> {
        Ok(Self::oldest_first(self.all().await))
    }
}

/// Object storage kept in memory, optionally failing every upload
#[derive(Default)]
pub struct InMemoryStorage {
    objects: RwLock<HashMap<String, (Vec<u8>, String)>>,
    deleted: RwLock<Vec<String>>,
    fail_uploads: bool,
}

impl InMemoryStorage {
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        if self.fail_uploads {
            return Err(AppError::ExternalServiceError(format!(
                "Failed to upload file '{}': connection refused",
                key
            )));
        }
        self.objects
            .write()
            .await
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(key.to_string())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.write().await.remove(key);
        self.deleted.write().await.push(key.to_string());
        Ok(())
    }

    fn public_key(&self, path: &str) -> String {
        format!("public/{}", path.trim_start_matches('/'))
    }

    fn public_url(&self, key: &str) -> String {
        format!("http://media.test/kguardian/{}", key)
    }
}
