//! ResponseOrchestrator - one crisis-aware reply per user turn.
//!
//! Wraps a single generation call with the crisis classifier, the dialogue
//! tracker and the safety protocol. Generation failures never surface as
//! errors; they become deterministic text.

use std::sync::Arc;

use crate::domain::conversation::{interpretation_instructions, interpretation_message, Persona, Utterance};
use crate::domain::safety::{CrisisClassifier, DialogueState, DialogueTracker, ResourceResolver, SafetyProtocol};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Reply used when a non-crisis first interpretation cannot be generated.
pub const ANALYSIS_UNAVAILABLE: &str =
    "I apologize, but I'm having trouble analyzing your dream right now.";

/// Request purposes, used for tracing and by test doubles for routing.
pub mod purpose {
    pub const INTERPRETATION: &str = "interpretation";
    pub const CHAT: &str = "chat";
    pub const KEYWORDS: &str = "keywords";
    pub const MOOD: &str = "mood";
}

const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Generated, possibly with safety text appended.
    Generated,
    /// Fixed safety message; generation was skipped.
    Fixed,
    /// Deterministic template after a generation failure.
    Fallback,
}

/// A reply ready to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratedReply {
    pub text: String,
    pub crisis: bool,
    pub source: ReplySource,
}

impl OrchestratedReply {
    fn new(text: impl Into<String>, crisis: bool, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            crisis,
            source,
        }
    }
}

/// Composes classification, dialogue tracking and the safety protocol
/// around one generation call.
#[derive(Clone)]
pub struct ResponseOrchestrator {
    provider: Arc<dyn AIProvider>,
    classifier: CrisisClassifier,
    tracker: DialogueTracker,
    protocol: SafetyProtocol,
    temperature: f32,
}

impl ResponseOrchestrator {
    pub fn new(provider: Arc<dyn AIProvider>, resolver: ResourceResolver) -> Self {
        Self {
            provider,
            classifier: CrisisClassifier::default(),
            tracker: DialogueTracker::new(resolver.clone()),
            protocol: SafetyProtocol::new(resolver),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Interprets a freshly submitted dream.
    ///
    /// A crisis-flagged dream gets the fixed safety message and no
    /// generation call is made.
    pub async fn first_submission(
        &self,
        dream_text: &str,
        previous_dreams: &[String],
        metadata: RequestMetadata,
    ) -> OrchestratedReply {
        if self.classifier.matched_keyword(dream_text).is_some() {
            return OrchestratedReply::new(
                self.protocol.first_submission_message(),
                true,
                ReplySource::Fixed,
            );
        }

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(interpretation_instructions(previous_dreams))
            .with_message(MessageRole::User, interpretation_message(dream_text))
            .with_temperature(self.temperature);

        match self.provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                OrchestratedReply::new(response.content, false, ReplySource::Generated)
            }
            Ok(_) => {
                tracing::warn!("Interpretation came back empty, using apology text");
                OrchestratedReply::new(ANALYSIS_UNAVAILABLE, false, ReplySource::Fallback)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Interpretation failed, using apology text");
                OrchestratedReply::new(ANALYSIS_UNAVAILABLE, false, ReplySource::Fallback)
            }
        }
    }

    /// Replies to a follow-up turn.
    ///
    /// `history` holds the turns before `input`; the dialogue state is
    /// derived from it alone.
    pub async fn respond(
        &self,
        persona: Persona,
        dream: Option<&str>,
        history: &[Utterance],
        input: &str,
        metadata: RequestMetadata,
    ) -> OrchestratedReply {
        let crisis = self.classifier.matched_keyword(input).is_some();
        let state = if crisis {
            self.tracker.track(history)
        } else {
            DialogueState::default()
        };

        let mut instructions = persona.follow_up_instructions().to_string();
        if crisis {
            tracing::info!(
                asked_for_country = state.asked_for_country,
                known_country = state.known_country.as_deref().unwrap_or("unknown"),
                "Crisis protocol engaged"
            );
            instructions.push_str(&self.protocol.instructions());
        }

        let request = CompletionRequest::new(metadata)
            .with_system_prompt(instructions)
            .with_message(MessageRole::User, persona.render_context(dream, history, input))
            .with_temperature(self.temperature);

        match self.provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                let text = if crisis {
                    self.protocol.guarantee(response.content, &state)
                } else {
                    response.content
                };
                OrchestratedReply::new(text, crisis, ReplySource::Generated)
            }
            Ok(_) => {
                tracing::warn!(crisis, "Reply came back empty, using fallback");
                OrchestratedReply::new(self.protocol.fallback(crisis, &state), crisis, ReplySource::Fallback)
            }
            Err(e) => {
                tracing::warn!(error = %e, crisis, "Reply generation failed, using fallback");
                OrchestratedReply::new(self.protocol.fallback(crisis, &state), crisis, ReplySource::Fallback)
            }
        }
    }
}

impl std::fmt::Debug for ResponseOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseOrchestrator")
            .field("provider", &self.provider.provider_info().name)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}
