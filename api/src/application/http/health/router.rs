use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    health_live::{__path_health_live, health_live},
    health_ready::{__path_health_ready, health_ready},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(health_live, health_ready))]
pub struct HealthApiDoc;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
}
