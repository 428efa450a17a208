//! Dream journal domain module.
//!
//! Saved dreams, their mood labels, history filters, and statistics.

mod filter;
mod mood;
pub(crate) mod record;
mod statistics;

pub use filter::DreamFilter;
pub use mood::Mood;
pub use record::{transcript_text, DreamRecord};
pub use statistics::{DreamStatistics, Frequency};
