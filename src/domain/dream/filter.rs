//! Search filter over a user's dreams.

use chrono::NaiveDate;

use super::{DreamRecord, Mood};

/// Criteria for browsing dream history. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DreamFilter {
    /// Case-insensitive substring of the dream text or any keyword.
    pub text: Option<String>,
    /// Exact UTC calendar day of creation.
    pub date: Option<NaiveDate>,
    /// Exact mood.
    pub mood: Option<Mood>,
}

impl DreamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Parses a mood filter where "All" (any case) or blank means no filter.
    pub fn with_mood_label(self, label: &str) -> Result<Self, crate::domain::foundation::ValidationError> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(self);
        }
        Ok(self.with_mood(trimmed.parse()?))
    }

    /// Returns true if the record satisfies every criterion set.
    pub fn matches(&self, record: &DreamRecord) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let in_text = record.dream_text().to_lowercase().contains(&needle);
            let in_keywords = record
                .keywords()
                .iter()
                .any(|k| k.to_lowercase().contains(&needle));
            if !in_text && !in_keywords {
                return false;
            }
        }

        if let Some(date) = self.date {
            if record.created_at().date() != date {
                return false;
            }
        }

        if let Some(mood) = self.mood {
            if record.mood() != mood {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dream::record::test_support::record_at;

    fn sample() -> DreamRecord {
        record_at(
            "a@b.io",
            "Swimming with whales",
            "2024-05-01T22:00:00Z",
            &["Ocean", "freedom"],
            Mood::Mysterious,
            &["awe"],
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(DreamFilter::new().matches(&sample()));
    }

    #[test]
    fn text_matches_dream_or_keywords() {
        assert!(DreamFilter::new().with_text("WHALE").matches(&sample()));
        assert!(DreamFilter::new().with_text("ocean").matches(&sample()));
        assert!(!DreamFilter::new().with_text("desert").matches(&sample()));
    }

    #[test]
    fn blank_text_is_ignored() {
        assert_eq!(DreamFilter::new().with_text("  ").text, None);
    }

    #[test]
    fn date_matches_exact_day() {
        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let may_second = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert!(DreamFilter::new().with_date(may_first).matches(&sample()));
        assert!(!DreamFilter::new().with_date(may_second).matches(&sample()));
    }

    #[test]
    fn mood_label_all_means_no_filter() {
        let filter = DreamFilter::new().with_mood_label("All").unwrap();
        assert_eq!(filter.mood, None);

        let filter = DreamFilter::new().with_mood_label("positive").unwrap();
        assert!(!filter.matches(&sample()));
        assert!(DreamFilter::new().with_mood_label("unknown").is_err());
    }
}
