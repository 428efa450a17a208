//! Application layer - command and query handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports. They
//! own no state beyond the ports injected at construction.

pub mod handlers;

pub use handlers::{
    ChatError, DreamJournalHandler, DreamStatisticsHandler, FreeAnalysisHandler, LoginHandler,
    RegisterUserHandler, ResponseOrchestrator, SendMessageHandler, SignalExtractor,
    SubmitDreamHandler,
};
