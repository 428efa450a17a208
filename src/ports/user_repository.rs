//! User repository port.

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::user::{Email, UserAccount};
use async_trait::async_trait;

/// Repository port for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, account: &UserAccount) -> Result<(), DomainError>;

    /// Find an account by email. Returns `None` if not registered.
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, DomainError>;

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn record_login(&self, email: &Email, at: Timestamp) -> Result<(), DomainError>;
}
