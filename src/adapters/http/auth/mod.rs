//! HTTP adapter for account endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest};
pub use handlers::AuthHandlers;
pub use routes::auth_routes;
