//! Top-level router: feature routes plus the cross-cutting layers.

use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::analysis::analysis_routes;
use super::auth::auth_routes;
use super::dreams::dream_routes;
use super::middleware::auth_middleware;
use super::sessions::session_routes;
use super::state::AppState;

/// Cross-cutting settings for the router.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    /// Allowed browser origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl RouterSettings {
    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            cors_origins: config.cors_origins_list(),
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete API router.
pub fn api_router(state: AppState, settings: &RouterSettings) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes(state.auth))
        .nest("/api/analysis", analysis_routes(state.analysis))
        .nest("/api/dreams", dream_routes(state.dreams))
        .merge(session_routes(state.sessions))
        .layer(middleware::from_fn_with_state(state.validator, auth_middleware))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_server_config() {
        let mut config = ServerConfig::default();
        config.request_timeout_secs = 30;
        config.cors_origins = Some("https://dreams.example.com, ".to_string());

        let settings = RouterSettings::from_server_config(&config);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.cors_origins, vec!["https://dreams.example.com"]);
    }

    #[test]
    fn unparseable_origins_are_skipped() {
        let _ = cors_layer(&["https://ok.example.com".to_string(), "bad\norigin".to_string()]);
    }
}
