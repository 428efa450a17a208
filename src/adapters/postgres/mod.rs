//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDreamRepository` - saved dreams
//! - `PostgresUserRepository` - accounts

mod dream_repository;
mod user_repository;

pub use dream_repository::PostgresDreamRepository;
pub use user_repository::PostgresUserRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a sqlx error to a domain error.
///
/// Connection-level failures become `StorageUnavailable` so callers can tell
/// an unreachable store apart from a bad query.
pub(crate) fn map_sqlx_error(action: &str, e: sqlx::Error) -> DomainError {
    let code = match &e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            ErrorCode::StorageUnavailable
        }
        _ => ErrorCode::DatabaseError,
    };
    tracing::error!(error = %e, action, "Database operation failed");
    DomainError::new(code, format!("Failed to {}: {}", action, e))
}
