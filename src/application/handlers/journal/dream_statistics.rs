//! DreamStatisticsHandler - aggregate view over a user's journal.

use std::sync::Arc;

use crate::domain::dream::DreamStatistics;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::DreamRepository;

pub struct DreamStatisticsHandler {
    dreams: Arc<dyn DreamRepository>,
}

impl DreamStatisticsHandler {
    pub fn new(dreams: Arc<dyn DreamRepository>) -> Self {
        Self { dreams }
    }

    /// `None` when the user has no dreams yet.
    pub async fn handle(&self, owner: &UserId, now: Timestamp) -> Result<Option<DreamStatistics>, DomainError> {
        let dreams = self.dreams.list_all(owner).await?;
        Ok(DreamStatistics::compute(&dreams, now))
    }
}
