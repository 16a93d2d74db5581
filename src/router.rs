use axum::{http::StatusCode, middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api, diagnostics, health_check, metrics_handler, request_validation_middleware,
    security_headers_middleware, RequestLimits,
};
use crate::observability::{observability_middleware, Metrics};

/// HTTP-level settings applied to every route
#[derive(Debug, Clone, Copy)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    pub max_request_size: u64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_request_size: 1024 * 1024,
        }
    }
}

/// Assemble the full application: API, diagnostics, health and metrics routes plus middleware
pub fn create_app(
    metrics: Arc<Metrics>,
    api_state: api::ApiState,
    diagnostics_state: diagnostics::DiagnosticsState,
    settings: RouterSettings,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    // The storefront is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(api::create_api_router(api_state))
        .merge(diagnostics::create_diagnostics_router(diagnostics_state))
        .fallback(not_found)
        // Outermost last
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn_with_state(
            RequestLimits {
                max_request_size: settings.max_request_size,
            },
            request_validation_middleware,
        ))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors)
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> (StatusCode, axum::Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({ "detail": "Not Found" })),
    )
}
