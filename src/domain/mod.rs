//! Domain layer - pure business logic with no I/O.

pub mod conversation;
pub mod dream;
pub mod foundation;
pub mod safety;
pub mod session;
pub mod signals;
pub mod user;
