//! Conversation domain module.
//!
//! Utterances, the append-only transcript they live in, and the personas
//! that speak for the service.

mod persona;
mod transcript;
mod utterance;

pub use persona::{interpretation_instructions, interpretation_message, Persona, THERAPIST_WELCOME};
pub use transcript::Conversation;
pub use utterance::{Role, Utterance};
