//! In-memory adapters for development and testing.

mod chat_session_store;
mod dream_repository;
mod user_repository;

pub use chat_session_store::InMemoryChatSessionStore;
pub use dream_repository::InMemoryDreamRepository;
pub use user_repository::InMemoryUserRepository;
