//! Dream Analyst - conversational dream journal with crisis-aware replies.
//!
//! Users submit dreams for interpretation, follow up in chat, and browse
//! their journal. Every reply passes a safety check that swaps generated
//! text for helpline guidance when a message signals a crisis.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
