//! HTTP handlers for the dream journal.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    DreamJournalHandler, DreamStatisticsHandler, SubmitDreamCommand, SubmitDreamHandler,
    DEFAULT_RECENT_LIMIT,
};
use crate::domain::foundation::{DreamId, Timestamp};

use super::dto::{
    DreamListResponse, DreamResponse, RecentDreamsQuery, SearchDreamsQuery, StatisticsResponse,
    SubmitDreamRequest, SubmitDreamResponse,
};

// ────────────────────────────────────────────────────────────────────────────
// Handler state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DreamHandlers {
    submit_handler: Arc<SubmitDreamHandler>,
    journal_handler: Arc<DreamJournalHandler>,
    statistics_handler: Arc<DreamStatisticsHandler>,
}

impl DreamHandlers {
    pub fn new(
        submit_handler: Arc<SubmitDreamHandler>,
        journal_handler: Arc<DreamJournalHandler>,
        statistics_handler: Arc<DreamStatisticsHandler>,
    ) -> Self {
        Self {
            submit_handler,
            journal_handler,
            statistics_handler,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/dreams
pub async fn submit_dream(
    State(handlers): State<DreamHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SubmitDreamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitDreamCommand {
        owner: user.id,
        dream_text: req.dream_text,
    };
    let result = handlers.submit_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(SubmitDreamResponse::from(result))))
}

/// GET /api/dreams
pub async fn search_dreams(
    State(handlers): State<DreamHandlers>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<SearchDreamsQuery>,
) -> Result<Json<DreamListResponse>, ApiError> {
    let filter = query.into_filter()?;
    let dreams = handlers.journal_handler.search(&user.id, &filter).await?;
    Ok(Json(DreamListResponse::new(&dreams)))
}

/// GET /api/dreams/recent
pub async fn recent_dreams(
    State(handlers): State<DreamHandlers>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<RecentDreamsQuery>,
) -> Result<Json<DreamListResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let dreams = handlers.journal_handler.recent(&user.id, limit).await?;
    Ok(Json(DreamListResponse::new(&dreams)))
}

/// GET /api/dreams/statistics
pub async fn dream_statistics(
    State(handlers): State<DreamHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let statistics = handlers
        .statistics_handler
        .handle(&user.id, Timestamp::now())
        .await?;
    Ok(Json(StatisticsResponse { statistics }))
}

/// GET /api/dreams/:id
pub async fn get_dream(
    State(handlers): State<DreamHandlers>,
    RequireAuth(user): RequireAuth,
    Path(dream_id): Path<String>,
) -> Result<Json<DreamResponse>, ApiError> {
    let id = dream_id
        .parse::<DreamId>()
        .map_err(|_| ApiError::bad_request("Invalid dream ID"))?;
    let dream = handlers.journal_handler.get(&user.id, id).await?;
    Ok(Json(DreamResponse::from(&dream)))
}
