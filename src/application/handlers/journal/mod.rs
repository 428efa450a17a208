//! Dream journal queries.

mod dream_statistics;
mod search_dreams;

pub use dream_statistics::DreamStatisticsHandler;
pub use search_dreams::{DreamJournalHandler, DEFAULT_RECENT_LIMIT};
