//! HTTP adapters - REST API over axum.
//!
//! Each feature has its own dto / handlers / routes module; `router` stitches
//! them together behind the auth, timeout, CORS and trace layers.

pub mod analysis;
pub mod auth;
pub mod dreams;
pub mod error;
pub mod middleware;
pub mod router;
pub mod sessions;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, RouterSettings};
pub use state::{AppDependencies, AppState};
