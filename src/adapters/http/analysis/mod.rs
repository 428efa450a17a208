//! HTTP adapter for guest dream analysis.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnalyzeDreamRequest, FreeAnalysisResponse};
pub use handlers::AnalysisHandlers;
pub use routes::analysis_routes;
