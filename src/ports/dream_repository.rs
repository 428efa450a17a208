//! Dream repository port.
//!
//! Defines the contract for persisting and querying saved dreams. Every
//! query is scoped to one owner; there is no cross-user access.

use crate::domain::dream::{DreamFilter, DreamRecord};
use crate::domain::foundation::{DomainError, DreamId, UserId};
use async_trait::async_trait;

/// Repository port for DreamRecord persistence.
///
/// Records are immutable once saved; there is no update or delete.
#[async_trait]
pub trait DreamRepository: Send + Sync {
    /// Save a new dream.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `StorageUnavailable` on persistence failure
    async fn save(&self, dream: &DreamRecord) -> Result<(), DomainError>;

    /// Find one of the owner's dreams by id.
    ///
    /// Returns `None` if it doesn't exist or belongs to someone else.
    async fn find_by_id(&self, owner: &UserId, id: &DreamId) -> Result<Option<DreamRecord>, DomainError>;

    /// Owner's dreams matching `filter`, newest first.
    async fn search(&self, owner: &UserId, filter: &DreamFilter) -> Result<Vec<DreamRecord>, DomainError>;

    /// Owner's `limit` most recent dreams, newest first.
    async fn recent(&self, owner: &UserId, limit: usize) -> Result<Vec<DreamRecord>, DomainError>;

    /// Every dream the owner has saved (for statistics), newest first.
    async fn list_all(&self, owner: &UserId) -> Result<Vec<DreamRecord>, DomainError> {
        self.search(owner, &DreamFilter::default()).await
    }
}
