//! HTTP DTOs for guest analysis.

use serde::{Deserialize, Serialize};

use crate::adapters::http::sessions::SessionResponse;
use crate::application::handlers::FreeAnalysisResult;
use crate::domain::dream::Mood;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeDreamRequest {
    pub dream_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeAnalysisResponse {
    pub analysis: String,
    pub mood: Mood,
    pub emotions: Vec<String>,
    pub crisis: bool,
    /// Guest analyst session for follow-up questions.
    pub session: SessionResponse,
}

impl From<FreeAnalysisResult> for FreeAnalysisResponse {
    fn from(result: FreeAnalysisResult) -> Self {
        Self {
            session: SessionResponse::from(&result.session),
            analysis: result.analysis,
            mood: result.mood.mood,
            emotions: result.mood.emotions,
            crisis: result.crisis,
        }
    }
}
