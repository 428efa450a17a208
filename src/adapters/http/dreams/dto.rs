//! HTTP DTOs for the dream journal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::sessions::SessionResponse;
use crate::application::handlers::SubmitDreamResult;
use crate::domain::dream::{DreamFilter, DreamRecord, DreamStatistics, Mood};

// ────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDreamRequest {
    pub dream_text: String,
}

/// `GET /api/dreams?q=flying&date=2024-06-01&mood=All`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDreamsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl SearchDreamsQuery {
    pub fn into_filter(self) -> Result<DreamFilter, ApiError> {
        let mut filter = DreamFilter::new();
        if let Some(q) = self.q {
            filter = filter.with_text(q);
        }
        if let Some(date) = self.date.filter(|d| !d.trim().is_empty()) {
            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| ApiError::bad_request("Invalid date, expected YYYY-MM-DD"))?;
            filter = filter.with_date(date);
        }
        if let Some(mood) = self.mood {
            filter = filter
                .with_mood_label(&mood)
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
        }
        Ok(filter)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentDreamsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamResponse {
    pub id: String,
    pub dream_text: String,
    pub analysis: String,
    pub keywords: Vec<String>,
    pub mood: Mood,
    pub emotions: Vec<String>,
    pub created_at: String,
}

impl From<&DreamRecord> for DreamResponse {
    fn from(dream: &DreamRecord) -> Self {
        Self {
            id: dream.id().to_string(),
            dream_text: dream.dream_text().to_string(),
            analysis: dream.analysis().to_string(),
            keywords: dream.keywords().to_vec(),
            mood: dream.mood(),
            emotions: dream.emotions().to_vec(),
            created_at: dream.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamListResponse {
    pub dreams: Vec<DreamResponse>,
}

impl DreamListResponse {
    pub fn new(dreams: &[DreamRecord]) -> Self {
        Self {
            dreams: dreams.iter().map(DreamResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitDreamResponse {
    pub dream: DreamResponse,
    pub crisis: bool,
    pub session: SessionResponse,
}

impl From<SubmitDreamResult> for SubmitDreamResponse {
    fn from(result: SubmitDreamResult) -> Self {
        Self {
            dream: DreamResponse::from(&result.dream),
            crisis: result.crisis,
            session: SessionResponse::from(&result.session),
        }
    }
}

/// `statistics` is null until the first dream is saved.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub statistics: Option<DreamStatistics>,
}
