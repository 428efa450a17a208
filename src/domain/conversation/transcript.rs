//! Conversation - ordered, append-only sequence of utterances.

use serde::{Deserialize, Serialize};

use super::{Role, Utterance};
use crate::domain::foundation::DomainError;

/// Ordered, append-only transcript owned by exactly one chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    utterances: Vec<Utterance>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new utterance and returns it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<&Utterance, DomainError> {
        let position = self.utterances.len();
        let utterance = Utterance::new(position, role, content)?;
        self.utterances.push(utterance);
        Ok(&self.utterances[position])
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.utterances.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_sequential_positions() {
        let mut conv = Conversation::new();
        conv.append(Role::Therapist, "Hello").unwrap();
        conv.append(Role::User, "Hi").unwrap();

        let positions: Vec<usize> = conv.utterances().iter().map(|u| u.position()).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(conv.last().unwrap().content(), "Hi");
    }

    #[test]
    fn failed_append_leaves_transcript_untouched() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "first").unwrap();
        assert!(conv.append(Role::User, "   ").is_err());
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn new_conversation_is_empty() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert!(conv.last().is_none());
    }
}
