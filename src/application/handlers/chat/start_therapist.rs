//! StartTherapistSessionHandler - opens a therapist conversation.

use std::sync::Arc;

use super::ChatError;
use crate::domain::foundation::UserId;
use crate::domain::session::ChatSession;
use crate::ports::ChatSessionStore;

/// Handler for opening therapist sessions.
pub struct StartTherapistSessionHandler {
    sessions: Arc<dyn ChatSessionStore>,
}

impl StartTherapistSessionHandler {
    pub fn new(sessions: Arc<dyn ChatSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, owner: UserId) -> Result<ChatSession, ChatError> {
        let session = ChatSession::start_therapist(Some(owner))?;
        self.sessions.put(&session).await?;
        tracing::debug!(session_id = %session.id(), "Therapist session started");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionStore;
    use crate::domain::conversation::THERAPIST_WELCOME;

    #[tokio::test]
    async fn session_is_stored_with_welcome() {
        let store = InMemoryChatSessionStore::new();
        let handler = StartTherapistSessionHandler::new(Arc::new(store.clone()));
        let owner = UserId::new("a@b.io").unwrap();

        let session = handler.handle(owner.clone()).await.unwrap();

        let stored = store.get(&session.id()).await.unwrap().unwrap();
        assert_eq!(stored.owner(), Some(&owner));
        assert_eq!(stored.conversation().utterances()[0].content(), THERAPIST_WELCOME);
    }
}
