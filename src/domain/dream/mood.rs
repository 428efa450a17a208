//! Mood label attached to every saved dream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Overall tone of a dream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Neutral,
    Negative,
    Mysterious,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Positive, Mood::Neutral, Mood::Negative, Mood::Mysterious];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Positive => "positive",
            Mood::Neutral => "neutral",
            Mood::Negative => "negative",
            Mood::Mysterious => "mysterious",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .find(|m| m.as_str() == normalized)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "mood",
                    format!("'{}' is not one of positive, neutral, negative, mysterious", s),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("Positive".parse::<Mood>().unwrap(), Mood::Positive);
        assert_eq!(" mysterious ".parse::<Mood>().unwrap(), Mood::Mysterious);
    }

    #[test]
    fn rejects_unknown_label() {
        assert!("ecstatic".parse::<Mood>().is_err());
        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn default_is_neutral() {
        assert_eq!(Mood::default(), Mood::Neutral);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Negative).unwrap(), "\"negative\"");
    }
}
