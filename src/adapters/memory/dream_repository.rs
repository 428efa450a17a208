//! In-memory DreamRepository.
//!
//! Used when no database is configured, and in tests. Can be switched into
//! an unavailable state to exercise store-failure paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dream::{DreamFilter, DreamRecord};
use crate::domain::foundation::{DomainError, DreamId, ErrorCode, UserId};
use crate::ports::DreamRepository;

/// In-memory storage for saved dreams, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDreamRepository {
    dreams: Arc<RwLock<Vec<DreamRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryDreamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StorageUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored dreams across all owners.
    pub async fn len(&self) -> usize {
        self.dreams.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.dreams.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::StorageUnavailable,
                "Dream store is unavailable",
            ));
        }
        Ok(())
    }

    async fn owned_newest_first(&self, owner: &UserId) -> Vec<DreamRecord> {
        let dreams = self.dreams.read().await;
        let mut owned: Vec<DreamRecord> = dreams
            .iter()
            .filter(|d| d.owner() == owner)
            .cloned()
            .collect();
        // Newest first; equal timestamps keep latest insertion first
        owned.reverse();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        owned
    }
}

#[async_trait]
impl DreamRepository for InMemoryDreamRepository {
    async fn save(&self, dream: &DreamRecord) -> Result<(), DomainError> {
        self.check_available()?;
        self.dreams.write().await.push(dream.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: &UserId, id: &DreamId) -> Result<Option<DreamRecord>, DomainError> {
        self.check_available()?;
        let dreams = self.dreams.read().await;
        Ok(dreams
            .iter()
            .find(|d| d.id() == *id && d.owner() == owner)
            .cloned())
    }

    async fn search(&self, owner: &UserId, filter: &DreamFilter) -> Result<Vec<DreamRecord>, DomainError> {
        self.check_available()?;
        Ok(self
            .owned_newest_first(owner)
            .await
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect())
    }

    async fn recent(&self, owner: &UserId, limit: usize) -> Result<Vec<DreamRecord>, DomainError> {
        self.check_available()?;
        let mut owned = self.owned_newest_first(owner).await;
        owned.truncate(limit);
        Ok(owned)
    }
}
