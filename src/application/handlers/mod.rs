//! Command and query handlers.

pub mod analysis;
pub mod chat;
pub mod journal;
pub mod user;

pub use analysis::{
    purpose, FreeAnalysisCommand, FreeAnalysisHandler, FreeAnalysisResult, OrchestratedReply,
    ReplySource, ResponseOrchestrator, SignalExtractor, SubmitDreamCommand, SubmitDreamError,
    SubmitDreamHandler, SubmitDreamResult,
};
pub use chat::{
    ChatError, ClearSessionHandler, GetSessionHandler, SendMessageCommand, SendMessageHandler,
    SendMessageResult, SessionLocks, StartTherapistSessionHandler,
};
pub use journal::{DreamJournalHandler, DreamStatisticsHandler, DEFAULT_RECENT_LIMIT};
pub use user::{
    LoginCommand, LoginError, LoginHandler, LoginResult, RegisterError, RegisterUserCommand,
    RegisterUserHandler,
};
