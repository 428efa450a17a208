//! HTTP adapter for the dream journal.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DreamListResponse, DreamResponse, RecentDreamsQuery, SearchDreamsQuery, StatisticsResponse,
    SubmitDreamRequest, SubmitDreamResponse,
};
pub use handlers::DreamHandlers;
pub use routes::dream_routes;
