//! ChatSession aggregate.
//!
//! A chat session is the explicit context object for one conversation: who
//! owns it, which persona speaks, the dream under discussion (analyst
//! sessions), and the transcript. Nothing about a conversation lives outside
//! its session.

use crate::domain::conversation::{Conversation, Persona, Role, THERAPIST_WELCOME};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// One conversation with the service.
///
/// # Invariants
///
/// - the transcript is never empty; it always starts with the opening turn
/// - analyst sessions always carry the dream text
/// - a session with an owner is only accessible to that owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    id: SessionId,
    owner: Option<UserId>,
    persona: Persona,
    dream_text: Option<String>,
    opening: String,
    conversation: Conversation,
    created_at: Timestamp,
}

impl ChatSession {
    /// Starts a therapist session opened with the fixed welcome.
    pub fn start_therapist(owner: Option<UserId>) -> Result<Self, DomainError> {
        Self::start(owner, Persona::Therapist, None, THERAPIST_WELCOME.to_string())
    }

    /// Starts an analyst session about `dream_text`, opened with its interpretation.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the dream or analysis is empty
    pub fn start_analyst(
        owner: Option<UserId>,
        dream_text: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let dream_text = dream_text.into();
        if dream_text.trim().is_empty() {
            return Err(DomainError::validation("dream_text", "Dream text cannot be empty"));
        }
        Self::start(owner, Persona::Analyst, Some(dream_text), analysis.into())
    }

    fn start(
        owner: Option<UserId>,
        persona: Persona,
        dream_text: Option<String>,
        opening: String,
    ) -> Result<Self, DomainError> {
        let mut conversation = Conversation::new();
        conversation.append(persona.speaker(), opening.clone())?;

        Ok(Self {
            id: SessionId::new(),
            owner,
            persona,
            dream_text,
            opening,
            conversation,
            created_at: Timestamp::now(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn dream_text(&self) -> Option<&str> {
        self.dream_text.as_deref()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Guest sessions are open to anyone holding the id; owned sessions only
    /// to their owner.
    pub fn authorize(&self, requester: Option<&UserId>) -> Result<(), DomainError> {
        match &self.owner {
            None => Ok(()),
            Some(owner) if Some(owner) == requester => Ok(()),
            Some(_) => Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this session",
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends one user turn and the service reply.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either text is empty; nothing is appended
    pub fn record_exchange(&mut self, user_text: &str, reply: &str) -> Result<(), DomainError> {
        if user_text.trim().is_empty() || reply.trim().is_empty() {
            return Err(DomainError::validation("content", "Message cannot be empty"));
        }
        self.conversation.append(Role::User, user_text)?;
        self.conversation.append(self.persona.speaker(), reply)?;
        Ok(())
    }

    /// Drops every turn after the opening one.
    pub fn clear(&mut self) -> Result<(), DomainError> {
        let mut conversation = Conversation::new();
        conversation.append(self.persona.speaker(), self.opening.clone())?;
        self.conversation = conversation;
        Ok(())
    }
}
