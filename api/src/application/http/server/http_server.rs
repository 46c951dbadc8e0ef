use std::sync::Arc;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION},
    },
    middleware,
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use pocket_recipe_core::{
    application::create_service, domain::common::PocketRecipeConfig,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info_span, warn};
use utoipa_scalar::{Scalar, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    application::{
        auth::session_guard,
        http::{
            account::router::account_routes,
            health::router::health_routes,
            recipe::router::recipe_routes,
            server::{app_state::AppState, openapi::api_doc},
        },
    },
    args::Args,
};

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = PocketRecipeConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT, LOCATION])
        .allow_credentials(true)
}

/// Application routes behind the session guard, plus the unguarded health probes.
pub fn routes(state: AppState) -> Router {
    let guarded = Router::new()
        .merge(recipe_routes())
        .merge(account_routes())
        .layer(middleware::from_fn_with_state(state.clone(), session_guard));

    Router::new()
        .merge(guarded)
        .merge(health_routes())
        .with_state(state)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        });

    let cors = cors_layer(&state.args.server.allowed_origins);
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let openapi = api_doc();

    let router = Router::new()
        .merge(Scalar::with_url("/scalar", openapi.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(routes(state))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer);

    Ok(router)
}
