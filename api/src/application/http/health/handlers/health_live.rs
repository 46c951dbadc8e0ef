use axum::extract::State;
use pocket_recipe_core::domain::health::ports::HealthCheckService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthLiveResponse {
    pub status: String,
    /// Database round-trip time in milliseconds.
    pub latency_ms: u64,
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    summary = "Liveness",
    responses(
        (status = 200, body = HealthLiveResponse),
        (status = 503, body = ApiErrorResponse)
    ),
)]
pub async fn health_live(
    State(state): State<AppState>,
) -> Result<Response<HealthLiveResponse>, ApiError> {
    let latency_ms = state
        .service
        .health()
        .await
        .map_err(|_| ApiError::ServiceUnavailable("Database unavailable".to_string()))?;

    Ok(Response::OK(HealthLiveResponse {
        status: "ok".to_string(),
        latency_ms,
    }))
}
