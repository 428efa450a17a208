//! Dream analysis handlers.

mod free_analysis;
mod orchestrator;
mod signals;
mod submit_dream;

pub use free_analysis::{FreeAnalysisCommand, FreeAnalysisHandler, FreeAnalysisResult};
pub use orchestrator::{
    purpose, OrchestratedReply, ReplySource, ResponseOrchestrator, ANALYSIS_UNAVAILABLE,
};
pub use signals::{keyword_metadata, mood_metadata, SignalExtractor};
pub use submit_dream::{SubmitDreamCommand, SubmitDreamError, SubmitDreamHandler, SubmitDreamResult};
