//! Chat session handlers.

mod errors;
mod get_session;
mod locks;
mod send_message;
mod start_therapist;

pub use errors::ChatError;
pub use get_session::{ClearSessionHandler, GetSessionHandler};
pub use locks::SessionLocks;
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use start_therapist::StartTherapistSessionHandler;
