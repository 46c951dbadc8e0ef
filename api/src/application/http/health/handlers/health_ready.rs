use axum::extract::State;
use pocket_recipe_core::domain::health::{entities::ReadinessReport, ports::HealthCheckService};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness",
    description = "Connectivity of the database (with the user count) and of the identity provider.",
    responses(
        (status = 200, body = ReadinessReport),
        (status = 503, body = ReadinessReport)
    ),
)]
pub async fn health_ready(State(state): State<AppState>) -> Response<ReadinessReport> {
    let report = state.service.readiness().await;

    if report.is_ready() {
        Response::OK(report)
    } else {
        Response::ServiceUnavailable(report)
    }
}
