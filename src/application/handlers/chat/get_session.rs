//! GetSessionHandler and ClearSessionHandler.

use std::sync::Arc;

use super::{ChatError, SessionLocks};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::ChatSession;
use crate::ports::ChatSessionStore;

/// Query for one chat session.
pub struct GetSessionHandler {
    sessions: Arc<dyn ChatSessionStore>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn ChatSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, id: SessionId, requester: Option<&UserId>) -> Result<ChatSession, ChatError> {
        let session = self
            .sessions
            .get(&id)
            .await?
            .ok_or_else(|| ChatError::not_found(id))?;
        session.authorize(requester)?;
        Ok(session)
    }
}

/// Resets a session to its opening turn.
pub struct ClearSessionHandler {
    sessions: Arc<dyn ChatSessionStore>,
    locks: SessionLocks,
}

impl ClearSessionHandler {
    pub fn new(sessions: Arc<dyn ChatSessionStore>, locks: SessionLocks) -> Self {
        Self { sessions, locks }
    }

    pub async fn handle(&self, id: SessionId, requester: Option<&UserId>) -> Result<ChatSession, ChatError> {
        let _guard = self.locks.acquire(id).await;

        let mut session = self
            .sessions
            .get(&id)
            .await?
            .ok_or_else(|| ChatError::not_found(id))?;
        session.authorize(requester)?;

        session.clear()?;
        self.sessions.put(&session).await?;
        Ok(session)
    }
}
