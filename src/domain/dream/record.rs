//! DreamRecord - one saved dream with its interpretation and signals.

use serde::{Deserialize, Serialize};

use super::Mood;
use crate::domain::foundation::{DomainError, DreamId, Timestamp, UserId};

const CONTEXT_PREVIEW_CHARS: usize = 150;

/// A saved dream. Created once per submission and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamRecord {
    id: DreamId,
    owner: UserId,
    dream_text: String,
    analysis: String,
    conversation: String,
    keywords: Vec<String>,
    mood: Mood,
    emotions: Vec<String>,
    created_at: Timestamp,
}

impl DreamRecord {
    /// Creates a new record stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `dream_text` is empty
    pub fn new(
        owner: UserId,
        dream_text: impl Into<String>,
        analysis: impl Into<String>,
        keywords: Vec<String>,
        mood: Mood,
        emotions: Vec<String>,
    ) -> Result<Self, DomainError> {
        let dream_text = dream_text.into();
        if dream_text.trim().is_empty() {
            return Err(DomainError::validation("dream_text", "Dream text cannot be empty"));
        }
        let analysis = analysis.into();
        let conversation = transcript_text(&dream_text, &analysis);

        Ok(Self {
            id: DreamId::new(),
            owner,
            dream_text,
            analysis,
            conversation,
            keywords,
            mood,
            emotions,
            created_at: Timestamp::now(),
        })
    }

    /// Rebuilds a record from storage without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DreamId,
        owner: UserId,
        dream_text: String,
        analysis: String,
        conversation: String,
        keywords: Vec<String>,
        mood: Mood,
        emotions: Vec<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            dream_text,
            analysis,
            conversation,
            keywords,
            mood,
            emotions,
            created_at,
        }
    }

    pub fn id(&self) -> DreamId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn dream_text(&self) -> &str {
        &self.dream_text
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn conversation(&self) -> &str {
        &self.conversation
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn emotions(&self) -> &[String] {
        &self.emotions
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// One line summarizing this dream for a later interpretation prompt.
    pub fn context_line(&self) -> String {
        let preview: String = self.dream_text.chars().take(CONTEXT_PREVIEW_CHARS).collect();
        format!("Previous dream ({}): {}...", self.created_at.day_label(), preview)
    }
}

/// Transcript text stored with a dream and fed to keyword extraction.
pub fn transcript_text(dream_text: &str, analysis: &str) -> String {
    format!("Dream: {}\n\nAnalysis: {}", dream_text, analysis)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{DateTime, Utc};

    /// Builds a stored record at a fixed instant.
    pub fn record_at(
        owner: &str,
        text: &str,
        rfc3339: &str,
        keywords: &[&str],
        mood: Mood,
        emotions: &[&str],
    ) -> DreamRecord {
        let at = DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc);
        DreamRecord::reconstitute(
            DreamId::new(),
            UserId::new(owner).unwrap(),
            text.to_string(),
            format!("analysis of {}", text),
            transcript_text(text, "analysis"),
            keywords.iter().map(|s| s.to_string()).collect(),
            mood,
            emotions.iter().map(|s| s.to_string()).collect(),
            Timestamp::from_datetime(at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record_at;
    use super::*;

    fn owner() -> UserId {
        UserId::new("dreamer@example.com").unwrap()
    }

    #[test]
    fn new_builds_transcript() {
        let record = DreamRecord::new(owner(), "I flew", "Freedom.", vec![], Mood::Positive, vec![]).unwrap();
        assert_eq!(record.conversation(), "Dream: I flew\n\nAnalysis: Freedom.");
    }

    #[test]
    fn new_rejects_empty_text() {
        assert!(DreamRecord::new(owner(), "  ", "x", vec![], Mood::Neutral, vec![]).is_err());
    }

    #[test]
    fn context_line_truncates_by_chars() {
        let long = "é".repeat(200);
        let record = record_at("a@b.io", &long, "2024-02-10T08:00:00Z", &[], Mood::Neutral, &[]);
        let line = record.context_line();

        assert!(line.starts_with("Previous dream (2024-02-10): "));
        assert!(line.ends_with("..."));
        assert_eq!(line.matches('é').count(), 150);
    }

    #[test]
    fn short_text_is_kept_whole() {
        let record = record_at("a@b.io", "falling", "2024-02-10T08:00:00Z", &[], Mood::Neutral, &[]);
        assert_eq!(record.context_line(), "Previous dream (2024-02-10): falling...");
    }
}
