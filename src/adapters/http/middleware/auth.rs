//! Bearer-token middleware and the extractors handlers use to read the caller.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser in extensions
//!                                      ↓
//!                  RequireAuth / OptionalAuth read it back
//! ```
//!
//! A request without an `Authorization` header passes through as a guest.
//! A request with a bad token is rejected here, before any handler runs.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Middleware state.
pub type AuthState = Arc<dyn SessionValidator>;

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let message = match e {
                AuthError::TokenExpired => "Token expired",
                _ => "Invalid token",
            };
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::unauthorized(message).into_response()
        }
    }
}

/// Extractor for endpoints that need a signed-in user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Extractor for endpoints open to guests. `None` means no token was sent.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use axum::http::StatusCode;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("dreamer@example.com").unwrap(), "dreamer@example.com")
    }

    fn parts(with_user: bool) -> Parts {
        let mut request = axum::http::Request::builder().uri("/test").body(()).unwrap();
        if with_user {
            request.extensions_mut().insert(test_user());
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts(true), &())
            .await
            .unwrap();
        assert_eq!(user.email, "dreamer@example.com");
    }

    #[tokio::test]
    async fn require_auth_rejects_guests_with_401() {
        let err = RequireAuth::from_request_parts(&mut parts(false), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.code, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn optional_auth_reports_presence() {
        let OptionalAuth(present) = OptionalAuth::from_request_parts(&mut parts(true), &())
            .await
            .unwrap();
        let OptionalAuth(absent) = OptionalAuth::from_request_parts(&mut parts(false), &())
            .await
            .unwrap();
        assert!(present.is_some());
        assert!(absent.is_none());
    }

    #[test]
    fn extractors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
        assert_send_sync::<OptionalAuth>();
    }
}
