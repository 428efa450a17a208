//! Chat handler errors.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Errors from chat session handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Session was not found.
    NotFound(SessionId),
    /// Session belongs to someone else.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Session store failure.
    Infrastructure(String),
}

impl ChatError {
    pub fn not_found(id: SessionId) -> Self {
        ChatError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChatError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::NotFound(_) => ErrorCode::SessionNotFound,
            ChatError::Forbidden => ErrorCode::Forbidden,
            ChatError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ChatError::Infrastructure(_) => ErrorCode::StorageUnavailable,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChatError::NotFound(id) => format!("Session not found: {}", id),
            ChatError::Forbidden => "Permission denied".to_string(),
            ChatError::ValidationFailed { message, .. } => message.clone(),
            ChatError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChatError {}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ChatError::Forbidden,
            ErrorCode::ValidationFailed => ChatError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ChatError::Infrastructure(err.message),
        }
    }
}
