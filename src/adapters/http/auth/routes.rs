//! HTTP routes for account endpoints.

use axum::{routing::post, Router};

use super::handlers::{login, register, AuthHandlers};

/// Account routes, nested under `/api/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(handlers)
}
