//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes: nominee resource scoped to one loan application
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications/{application_id}/nominee",
            get(handlers::nominee::get_nominee)
                .post(handlers::nominee::upsert_nominee)
                .delete(handlers::nominee::delete_application_nominee),
        )
        .route(
            "/applications/{application_id}/nominees",
            get(handlers::nominee::list_nominees).post(handlers::nominee::create_nominee),
        )
        .route(
            "/applications/{application_id}/nominee/{nominee_id}",
            get(handlers::nominee::get_nominee_by_id)
                .put(handlers::nominee::update_nominee)
                .delete(handlers::nominee::delete_nominee),
        )
}
