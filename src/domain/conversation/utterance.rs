//! Utterance entity for conversations.
//!
//! Utterances are immutable records of one turn within a conversation.
//! Each has a role, content, its position in the sequence, and a timestamp.

use crate::domain::foundation::{DomainError, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person journaling.
    User,
    /// Dream interpretation persona.
    Analyst,
    /// Supportive conversation persona.
    Therapist,
    /// Fixed messages produced by the service itself.
    System,
}

impl Role {
    /// True for every role that speaks on behalf of the service.
    pub fn is_service_authored(&self) -> bool {
        !matches!(self, Role::User)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Analyst => "analyst",
            Role::Therapist => "therapist",
            Role::System => "system",
        };
        write!(f, "{}", s)
    }
}

/// An immutable turn within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - `position` is the zero-based index in the owning conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    position: usize,
    role: Role,
    content: String,
    created_at: Timestamp,
}

impl Utterance {
    /// Creates a new utterance at the given position.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or whitespace
    pub(crate) fn new(
        position: usize,
        role: Role,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Utterance content cannot be empty",
            ));
        }

        Ok(Self {
            position,
            role,
            content,
            created_at: Timestamp::now(),
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns true if this was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
