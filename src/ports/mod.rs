//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text generation service
//! - `DreamRepository` - saved dreams (document store)
//! - `UserRepository` - accounts
//! - `ChatSessionStore` - per-conversation session context
//! - `SessionValidator` / `TokenIssuer` - bearer tokens

mod ai_provider;
mod chat_session_store;
mod dream_repository;
mod session_validator;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    ProviderInfo, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use chat_session_store::ChatSessionStore;
pub use dream_repository::DreamRepository;
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use user_repository::UserRepository;
