//! HTTP routes for chat session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    clear_session, get_session, send_message, start_therapist_session, SessionHandlers,
};

/// Session routes, mounted at the API root.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/api/therapist/sessions", post(start_therapist_session))
        .route("/api/sessions/:id", get(get_session).delete(clear_session))
        .route("/api/sessions/:id/messages", post(send_message))
        .with_state(handlers)
}
