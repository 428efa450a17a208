//! Dream history queries: filtered search, most recent, single dream.

use std::sync::Arc;

use crate::domain::dream::{DreamFilter, DreamRecord};
use crate::domain::foundation::{DomainError, DreamId, ErrorCode, UserId};
use crate::ports::DreamRepository;

/// Default page size for the recent-dreams view.
pub const DEFAULT_RECENT_LIMIT: usize = 5;
const MAX_RECENT_LIMIT: usize = 50;

/// Queries over one owner's saved dreams.
pub struct DreamJournalHandler {
    dreams: Arc<dyn DreamRepository>,
}

impl DreamJournalHandler {
    pub fn new(dreams: Arc<dyn DreamRepository>) -> Self {
        Self { dreams }
    }

    /// Dreams matching `filter`, newest first.
    pub async fn search(&self, owner: &UserId, filter: &DreamFilter) -> Result<Vec<DreamRecord>, DomainError> {
        self.dreams.search(owner, filter).await
    }

    /// The `limit` most recent dreams, capped at 50.
    pub async fn recent(&self, owner: &UserId, limit: usize) -> Result<Vec<DreamRecord>, DomainError> {
        self.dreams.recent(owner, limit.min(MAX_RECENT_LIMIT)).await
    }

    /// One dream with its full analysis.
    ///
    /// # Errors
    ///
    /// - `DreamNotFound` if it doesn't exist or belongs to someone else
    pub async fn get(&self, owner: &UserId, id: DreamId) -> Result<DreamRecord, DomainError> {
        self.dreams
            .find_by_id(owner, &id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::DreamNotFound, format!("Dream not found: {}", id)))
    }
}
