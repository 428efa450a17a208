//! Signals domain module.
//!
//! Structured metadata (keywords, mood, emotions) parsed from generated
//! JSON, with fixed fallbacks when the output cannot be used.

mod extraction;

pub use extraction::{
    fallback_keywords, keyword_fallback, mood_fallback, parse_keywords, parse_mood, Extraction,
    MoodSignal, SignalError, KEYWORD_INSTRUCTIONS, MOOD_INSTRUCTIONS,
};
