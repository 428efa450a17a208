//! HTTP routes for guest analysis.

use axum::{routing::post, Router};

use super::handlers::{analyze_free, AnalysisHandlers};

/// Nested under `/api/analysis`.
pub fn analysis_routes(handlers: AnalysisHandlers) -> Router {
    Router::new()
        .route("/free", post(analyze_free))
        .with_state(handlers)
}
