use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::incidents::dtos::{
    CreateIncidentDto, IncidentCatalogDto, IncidentListItemDto, IncidentResponseDto,
    ListIncidentsQuery, SubmitIncidentResponseDto,
};
use crate::features::incidents::repository::IncidentRepository;
use crate::features::media::dtos::MediaFile;
use crate::features::media::MediaService;

const MEDIA_FAILED_WARNING: &str = "Media upload failed. The incident was submitted without media.";

/// Service for filing and reading incidents
pub struct IncidentService {
    repository: Arc<dyn IncidentRepository>,
    media_service: Arc<MediaService>,
}

impl IncidentService {
    pub fn new(repository: Arc<dyn IncidentRepository>, media_service: Arc<MediaService>) -> Self {
        Self {
            repository,
            media_service,
        }
    }

    /// Option lists for the report form
    pub fn catalog(&self) -> IncidentCatalogDto {
        IncidentCatalogDto::current()
    }

    /// File a report whose evidence, if any, was uploaded beforehand
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateIncidentDto,
    ) -> Result<IncidentResponseDto> {
        dto.check().map_err(AppError::InvalidFields)?;

        let incident = self
            .repository
            .insert(&dto.into_new_incident(&user.sub))
            .await?;

        info!(
            "Incident filed: id={}, type={}, reporter={}",
            incident.id, incident.incident_type, incident.reported_by
        );

        Ok(incident.into())
    }

    /// File a report and store its evidence in one step.
    ///
    /// The form is validated before any upload. A failed upload is reported
    /// as `media_warning` and the report is filed without media. If the
    /// insert fails, the uploaded object is removed again.
    pub async fn submit(
        &self,
        user: &AuthenticatedUser,
        mut dto: CreateIncidentDto,
        media: Option<MediaFile>,
    ) -> Result<SubmitIncidentResponseDto> {
        dto.check().map_err(AppError::InvalidFields)?;

        let mut media_warning = None;
        let uploaded = match media {
            Some(file) => match self.media_service.upload(&user.sub, file).await {
                Ok(media) => Some(media),
                Err(e) => {
                    warn!("Evidence upload failed for {}: {}", user.sub, e);
                    media_warning = Some(media_warning_for(&e));
                    None
                }
            },
            None => None,
        };

        dto.media_url = uploaded.as_ref().map(|m| m.url.clone());

        let incident = match self
            .repository
            .insert(&dto.into_new_incident(&user.sub))
            .await
        {
            Ok(incident) => incident,
            Err(e) => {
                if let Some(media) = &uploaded {
                    self.media_service.discard(&media.key).await;
                }
                return Err(e);
            }
        };

        info!(
            "Incident filed: id={}, type={}, reporter={}, media={}",
            incident.id,
            incident.incident_type,
            incident.reported_by,
            uploaded.is_some()
        );

        Ok(SubmitIncidentResponseDto {
            incident: incident.into(),
            media: uploaded,
            media_warning,
        })
    }

    /// The caller's own reports, newest first
    pub async fn list_for_user(
        &self,
        user: &AuthenticatedUser,
        query: &ListIncidentsQuery,
    ) -> Result<Vec<IncidentListItemDto>> {
        let incidents = self
            .repository
            .list_by_reporter(&user.sub, query.status_filter())
            .await?;

        let needle = query.search_needle();
        Ok(incidents
            .into_iter()
            .filter(|i| match &needle {
                Some(n) => i.title.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .map(IncidentListItemDto::from)
            .collect())
    }

    /// A single report, visible to its reporter and to staff
    pub async fn get_for_user(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<IncidentResponseDto> {
        let incident = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|i| user.can_view_incident_of(&i.reported_by))
            .ok_or_else(|| AppError::NotFound(format!("Incident {} not found", id)))?;

        Ok(incident.into())
    }
}

/// Validation messages are shown as-is; anything else gets a generic note
fn media_warning_for(error: &AppError) -> String {
    match error {
        AppError::BadRequest(msg) => msg.clone(),
        _ => MEDIA_FAILED_WARNING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::incidents::models::StatusTone;
    use crate::shared::test_helpers::{
        create_staff_user, create_user, sample_incident, InMemoryIncidentRepository,
        InMemoryStorage,
    };

    struct Fixture {
        service: IncidentService,
        repository: Arc<InMemoryIncidentRepository>,
        storage: Arc<InMemoryStorage>,
    }

    fn fixture(repository: InMemoryIncidentRepository, storage: InMemoryStorage) -> Fixture {
        let repository = Arc::new(repository);
        let storage = Arc::new(storage);
        let media_service = Arc::new(MediaService::new(storage.clone()));
        Fixture {
            service: IncidentService::new(repository.clone(), media_service),
            repository,
            storage,
        }
    }

    fn empty_fixture() -> Fixture {
        fixture(Default::default(), Default::default())
    }

    fn valid_dto() -> CreateIncidentDto {
        CreateIncidentDto {
            title: "Stranger at the gate".to_string(),
            description: "Someone tried to enter without an ID card".to_string(),
            incident_type: "unauthorized-entry".to_string(),
            location: "Main Gate".to_string(),
            media_url: None,
        }
    }

    fn photo() -> MediaFile {
        MediaFile {
            file_name: "gate.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![1u8; 64],
            oversized: false,
        }
    }

    #[tokio::test]
    async fn test_create_stores_pending_incident() {
        let f = empty_fixture();
        let user = create_user("reporter-1");

        let incident = f.service.create(&user, valid_dto()).await.unwrap();

        assert_eq!(incident.status, "Pending");
        assert_eq!(incident.status_tone, StatusTone::Warning);
        assert_eq!(incident.reported_by, "reporter-1");
        assert_eq!(incident.incident_type_label, "Unauthorized Entry");
        assert_eq!(f.repository.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form_without_insert() {
        let f = empty_fixture();
        let dto = CreateIncidentDto {
            description: "short".to_string(),
            ..valid_dto()
        };

        let err = f.service.create(&create_user("u"), dto).await.unwrap_err();

        match err {
            AppError::InvalidFields(fields) => assert_eq!(fields.focus(), Some("description")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(f.repository.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_media_links_url() {
        let f = empty_fixture();

        let result = f
            .service
            .submit(&create_user("reporter-1"), valid_dto(), Some(photo()))
            .await
            .unwrap();

        let media = result.media.unwrap();
        assert_eq!(
            result.incident.media_url.as_deref(),
            Some(media.url.as_str())
        );
        assert!(result.media_warning.is_none());
        assert_eq!(f.storage.keys().await, vec![media.key]);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_never_uploads() {
        let f = empty_fixture();
        let dto = CreateIncidentDto {
            title: "Hey".to_string(),
            ..valid_dto()
        };

        let err = f
            .service
            .submit(&create_user("u"), dto, Some(photo()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidFields(_)));
        assert!(f.storage.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_upload_failure_still_files_report() {
        let f = fixture(Default::default(), InMemoryStorage::failing());

        let result = f
            .service
            .submit(&create_user("u"), valid_dto(), Some(photo()))
            .await
            .unwrap();

        assert!(result.media.is_none());
        assert!(result.incident.media_url.is_none());
        assert_eq!(result.media_warning.as_deref(), Some(MEDIA_FAILED_WARNING));
        assert_eq!(f.repository.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejected_media_warns_with_reason() {
        let f = empty_fixture();
        let file = MediaFile {
            content_type: "application/pdf".to_string(),
            ..photo()
        };

        let result = f
            .service
            .submit(&create_user("u"), valid_dto(), Some(file))
            .await
            .unwrap();

        assert_eq!(
            result.media_warning.as_deref(),
            Some("Unsupported file type. Please upload an image or video.")
        );
        assert_eq!(f.repository.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_insert_failure_discards_upload() {
        let repository = InMemoryIncidentRepository::failing();
        let f = fixture(repository, InMemoryStorage::default());

        let err = f
            .service
            .submit(&create_user("u"), valid_dto(), Some(photo()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(f.storage.keys().await.is_empty());
        assert_eq!(f.storage.deleted().await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_user_filters_owner_and_search() {
        let repository = InMemoryIncidentRepository::with(vec![
            sample_incident("alice", "Broken gate lock", "Pending", 3),
            sample_incident("alice", "Library theft", "Resolved", 2),
            sample_incident("bob", "Gate crasher", "Pending", 1),
        ]);
        let f = fixture(repository, InMemoryStorage::default());
        let alice = create_user("alice");

        let all = f
            .service
            .list_for_user(&alice, &ListIncidentsQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Library theft");

        let query = ListIncidentsQuery {
            search: Some("GATE".to_string()),
            status: Some("All".to_string()),
        };
        let found = f.service.list_for_user(&alice, &query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Broken gate lock");

        let query = ListIncidentsQuery {
            search: None,
            status: Some("Resolved".to_string()),
        };
        let resolved = f.service.list_for_user(&alice, &query).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].status_tone, StatusTone::Success);
    }

    #[tokio::test]
    async fn test_get_for_user_hides_other_reports() {
        let incident = sample_incident("alice", "Phone stolen", "Pending", 1);
        let id = incident.id;
        let f = fixture(
            InMemoryIncidentRepository::with(vec![incident]),
            InMemoryStorage::default(),
        );

        let owner = f.service.get_for_user(&create_user("alice"), id).await;
        assert!(owner.is_ok());
        let staff = f.service.get_for_user(&create_staff_user(), id).await;
        assert!(staff.is_ok());

        let err = f
            .service
            .get_for_user(&create_user("mallory"), id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
