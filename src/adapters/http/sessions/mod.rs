//! HTTP adapter for chat session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{SendMessageRequest, SendMessageResponse, SessionResponse, UtteranceResponse};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
