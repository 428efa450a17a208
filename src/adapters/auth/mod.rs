//! Authentication adapters.
//!
//! - `jwt` - HS256 tokens signed with the service secret

mod jwt;

pub use jwt::{JwtConfig, JwtSessionService};
