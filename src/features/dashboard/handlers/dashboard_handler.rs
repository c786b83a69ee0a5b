use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::{DashboardDto, DashboardQuery};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Analytics over every incident on campus
///
/// Status cards, status/type/location charts and recent incidents cover all
/// incidents; the trend series is limited to `range`.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard datasets", body = ApiResponse<DashboardDto>),
        (status = 400, description = "Unknown range"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard(
    _user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>, AppError> {
    let dashboard = service.get_dashboard(query.range).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::dashboard::dtos::{DashboardDto, TimeRange};
    use crate::features::dashboard::{routes, DashboardService};
    use crate::shared::test_helpers::{
        create_user, sample_incident, with_user, InMemoryIncidentRepository,
    };
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::sync::Arc;

    fn server(repository: InMemoryIncidentRepository) -> TestServer {
        let service = Arc::new(DashboardService::new(Arc::new(repository)));
        TestServer::new(with_user(routes::routes(service), create_user("viewer"))).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_covers_every_reporter() {
        let server = server(InMemoryIncidentRepository::with(vec![
            sample_incident("alice", "Bag stolen", "Pending", 1),
            sample_incident("bob", "Door forced", "Resolved", 2),
            sample_incident("carol", "Old case", "Resolved", 24 * 60),
        ]));

        let response = server
            .get("/api/dashboard")
            .add_query_param("range", "week")
            .await;

        response.assert_status_ok();
        let body: ApiResponse<DashboardDto> = response.json();
        let dashboard = body.data.unwrap();
        assert_eq!(dashboard.range, TimeRange::Week);
        assert_eq!(dashboard.summary.total, 3);
        assert_eq!(dashboard.summary.resolved.count, 2);
        assert_eq!(dashboard.trend.iter().map(|p| p.count).sum::<i64>(), 2);
        assert_eq!(dashboard.recent[0].title, "Bag stolen");
    }

    #[tokio::test]
    async fn test_dashboard_defaults_to_all() {
        let server = server(InMemoryIncidentRepository::default());

        let response = server.get("/api/dashboard").await;

        response.assert_status_ok();
        let body: ApiResponse<DashboardDto> = response.json();
        assert_eq!(body.data.unwrap().range, TimeRange::All);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_range() {
        let server = server(InMemoryIncidentRepository::default());

        let response = server
            .get("/api/dashboard")
            .add_query_param("range", "decade")
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
