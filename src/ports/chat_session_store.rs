//! Chat session store port.
//!
//! Sessions are the explicit per-conversation context. A store hands out
//! snapshots and accepts whole-session writes; callers must not assume two
//! sessions share anything.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::ChatSession;
use async_trait::async_trait;

/// Port for chat session persistence.
#[async_trait]
pub trait ChatSessionStore: Send + Sync {
    /// Store a new or updated session, replacing any previous snapshot.
    async fn put(&self, session: &ChatSession) -> Result<(), DomainError>;

    /// Find a session by id. Returns `None` if unknown.
    async fn get(&self, id: &SessionId) -> Result<Option<ChatSession>, DomainError>;

    /// Remove a session. Unknown ids are not an error.
    async fn remove(&self, id: &SessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ChatSessionStore) {}
    }
}
