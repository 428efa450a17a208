//! Dialogue state tracker.
//!
//! Derives from a transcript whether the service has already asked for the
//! user's country and whether the user has already named one. The state is
//! recomputed from the full history every turn and never stored.

use crate::domain::conversation::Utterance;

use super::ResourceResolver;

const COUNTRY_REQUEST_PHRASES: &[&str] = &["which country are you in", "what country are you in"];

/// Derived summary of the country exchange so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueState {
    pub asked_for_country: bool,
    pub known_country: Option<String>,
}

/// Scans transcripts for country requests and country mentions.
#[derive(Debug, Clone)]
pub struct DialogueTracker {
    resolver: ResourceResolver,
}

impl DialogueTracker {
    pub fn new(resolver: ResourceResolver) -> Self {
        Self { resolver }
    }

    /// Deterministic scan over the whole history.
    ///
    /// `known_country` is the first table key found in the earliest user
    /// utterance that mentions any key.
    pub fn track(&self, history: &[Utterance]) -> DialogueState {
        let asked_for_country = history
            .iter()
            .filter(|u| u.role().is_service_authored())
            .any(|u| is_country_request(u.content()));

        let known_country = history
            .iter()
            .filter(|u| u.is_user())
            .find_map(|u| self.resolver.find_country_in(u.content()))
            .map(str::to_string);

        DialogueState {
            asked_for_country,
            known_country,
        }
    }
}

/// True if `text` contains one of the literal country-request phrases.
pub fn is_country_request(text: &str) -> bool {
    let lowered = text.to_lowercase();
    COUNTRY_REQUEST_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}
