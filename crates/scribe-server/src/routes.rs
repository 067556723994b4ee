//! Router construction

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Upload cap for project archives.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Snippet analysis (the alias serves older front ends)
        .route("/analyze-all", post(handlers::analyze_all))
        .route("/document-code", post(handlers::analyze_all))
        // Project upload
        .route("/upload-zip", post(handlers::upload_zip))
        // Targeted tools
        .route("/generate-test", post(handlers::generate_test))
        .route("/refactor-code", post(handlers::refactor_code))
        .route("/live-metrics", post(handlers::live_metrics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
