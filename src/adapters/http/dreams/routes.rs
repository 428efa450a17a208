//! HTTP routes for the dream journal.

use axum::{routing::get, Router};

use super::handlers::{
    dream_statistics, get_dream, recent_dreams, search_dreams, submit_dream, DreamHandlers,
};

/// Nested under `/api/dreams`. Every route requires a signed-in user.
pub fn dream_routes(handlers: DreamHandlers) -> Router {
    Router::new()
        .route("/", get(search_dreams).post(submit_dream))
        .route("/recent", get(recent_dreams))
        .route("/statistics", get(dream_statistics))
        .route("/:id", get(get_dream))
        .with_state(handlers)
}
