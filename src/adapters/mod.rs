//! Adapters - implementations of port interfaces.
//!
//! - `ai` - Mistral chat completions and a scripted mock
//! - `auth` - JWT issuing and validation
//! - `http` - axum REST API
//! - `memory` - in-process stores
//! - `postgres` - sqlx-backed stores

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
