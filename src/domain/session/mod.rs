//! Chat session domain module.

mod aggregate;

pub use aggregate::ChatSession;
