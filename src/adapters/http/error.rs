//! Error bodies and status mapping shared by every endpoint.
//!
//! Every failure leaves the API as `{"code": "...", "message": "..."}` with a
//! status derived from the error's kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{ChatError, LoginError, RegisterError, SubmitDreamError};
use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON body for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// A failed request: status plus body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::Unauthorized, message)
    }

    /// Builds an error whose status follows from the domain code.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(status_for(code), code.to_string(), message)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::DreamNotFound | ErrorCode::UserNotFound | ErrorCode::SessionNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::AlreadyExists => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.body.code, message = %self.body.message, "Request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::from_code(err.code, err.message)
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        ApiError::from_code(err.code(), err.message())
    }
}

impl From<SubmitDreamError> for ApiError {
    fn from(err: SubmitDreamError) -> Self {
        match err {
            SubmitDreamError::Validation(msg) => ApiError::bad_request(msg),
            SubmitDreamError::StorageUnavailable(msg) => {
                ApiError::from_code(ErrorCode::StorageUnavailable, msg)
            }
            SubmitDreamError::Domain(err) => err.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::AlreadyRegistered => {
                ApiError::from_code(ErrorCode::AlreadyExists, err.to_string())
            }
            RegisterError::Infrastructure(msg) => {
                ApiError::from_code(ErrorCode::StorageUnavailable, msg)
            }
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            LoginError::Infrastructure(msg) => {
                ApiError::from_code(ErrorCode::StorageUnavailable, msg)
            }
            LoginError::Token(_) => ApiError::from_code(ErrorCode::InternalError, err.to_string()),
        }
    }
}
