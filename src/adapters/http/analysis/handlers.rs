//! HTTP handler for guest dream analysis.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{FreeAnalysisCommand, FreeAnalysisHandler};

use super::dto::{AnalyzeDreamRequest, FreeAnalysisResponse};

#[derive(Clone)]
pub struct AnalysisHandlers {
    free_handler: Arc<FreeAnalysisHandler>,
}

impl AnalysisHandlers {
    pub fn new(free_handler: Arc<FreeAnalysisHandler>) -> Self {
        Self { free_handler }
    }
}

/// POST /api/analysis/free - interpret without an account; nothing is saved
pub async fn analyze_free(
    State(handlers): State<AnalysisHandlers>,
    Json(req): Json<AnalyzeDreamRequest>,
) -> Result<Json<FreeAnalysisResponse>, ApiError> {
    let result = handlers
        .free_handler
        .handle(FreeAnalysisCommand {
            dream_text: req.dream_text,
        })
        .await?;
    Ok(Json(result.into()))
}
