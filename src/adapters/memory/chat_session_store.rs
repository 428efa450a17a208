//! In-memory ChatSessionStore.
//!
//! Chat sessions are short-lived conversation context, so they are kept in
//! process memory even when dreams and accounts live in PostgreSQL. A session
//! nobody has touched for the idle TTL is dropped. Expired entries are swept
//! on every write and hidden from reads.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::ChatSession;
use crate::ports::ChatSessionStore;

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    session: ChatSession,
    touched_at: Instant,
}

#[derive(Debug, Clone)]
pub struct InMemoryChatSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    idle_ttl: Duration,
}

impl InMemoryChatSessionStore {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Number of stored sessions, including any not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.touched_at) < self.idle_ttl
    }
}

impl Default for InMemoryChatSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatSessionStore for InMemoryChatSessionStore {
    async fn put(&self, session: &ChatSession) -> Result<(), DomainError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped idle chat sessions");
        }

        sessions.insert(
            session.id(),
            Entry {
                session: session.clone(),
                touched_at: now,
            },
        );
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<ChatSession>, DomainError> {
        let now = Instant::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|entry| self.is_live(entry, now))
            .map(|entry| entry.session.clone()))
    }

    async fn remove(&self, id: &SessionId) -> Result<(), DomainError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_remove() {
        let store = InMemoryChatSessionStore::new();
        let session = ChatSession::start_therapist(None).unwrap();

        store.put(&session).await.unwrap();
        assert_eq!(store.get(&session.id()).await.unwrap(), Some(session.clone()));

        store.remove(&session.id()).await.unwrap();
        assert!(store.get(&session.id()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn put_replaces_snapshot() {
        let store = InMemoryChatSessionStore::new();
        let mut session = ChatSession::start_therapist(None).unwrap();
        store.put(&session).await.unwrap();

        session.record_exchange("hello", "hi there").unwrap();
        store.put(&session).await.unwrap();

        let loaded = store.get(&session.id()).await.unwrap().unwrap();
        assert_eq!(loaded.conversation().len(), 3);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn idle_sessions_expire_and_are_swept_on_write() {
        let store = InMemoryChatSessionStore::with_idle_ttl(Duration::from_millis(20));
        let stale = ChatSession::start_therapist(None).unwrap();
        store.put(&stale).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(store.get(&stale.id()).await.unwrap().is_none());

        let fresh = ChatSession::start_therapist(None).unwrap();
        store.put(&fresh).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.get(&fresh.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn writing_a_session_keeps_it_alive() {
        let store = InMemoryChatSessionStore::with_idle_ttl(Duration::from_millis(200));
        let mut session = ChatSession::start_therapist(None).unwrap();
        store.put(&session).await.unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;
        session.record_exchange("still here", "so am I").unwrap();
        store.put(&session).await.unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.get(&session.id()).await.unwrap().is_some());
    }
}
