//! Crisis classifier - keyword heuristic for self-harm and suicide risk.
//!
//! Matching is case-insensitive substring containment with no stemming and
//! no negation handling. "I am not suicidal" is classified as a crisis; the
//! safety branch relies on recall over precision.

/// Keyword stems that put a turn into crisis mode.
pub const DEFAULT_CRISIS_KEYWORDS: &[&str] = &[
    "suicid",
    "kill myself",
    "end my life",
    "don't want to live",
    "self-harm",
    "cut myself",
    "hurt myself",
    "die",
    "death",
    "hopeless",
    "no reason to live",
    "no point",
    "can't go on",
    "give up",
    "too much pain",
    "better off without me",
];

/// Pure text classifier over a fixed keyword set.
#[derive(Debug, Clone)]
pub struct CrisisClassifier {
    keywords: Vec<String>,
}

impl CrisisClassifier {
    /// Creates a classifier over the given keywords (stored lower-cased).
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Returns true if any keyword occurs in `text`.
    pub fn classify(&self, text: &str) -> bool {
        self.matched_keyword(text).is_some()
    }

    /// Returns the first keyword found in `text`, if any.
    pub fn matched_keyword(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        let hit = self
            .keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(String::as_str);

        if let Some(keyword) = hit {
            tracing::warn!(keyword, "Crisis keyword detected");
        }
        hit
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for CrisisClassifier {
    fn default() -> Self {
        Self::with_keywords(DEFAULT_CRISIS_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn detects_explicit_statement() {
        assert!(CrisisClassifier::default().classify("I want to kill myself"));
    }

    #[test]
    fn detection_is_case_insensitive() {
        let classifier = CrisisClassifier::default();
        assert!(classifier.classify("Everything feels HOPELESS"));
        assert!(classifier.classify("I Can't Go On like this"));
    }

    #[test]
    fn negation_still_triggers() {
        assert!(CrisisClassifier::default().classify("I am not suicidal"));
    }

    #[test]
    fn ordinary_dream_is_not_crisis() {
        let classifier = CrisisClassifier::default();
        assert!(!classifier.classify("I was flying over a green valley with my cat"));
        assert!(!classifier.classify(""));
    }

    #[test]
    fn reports_matched_keyword() {
        let classifier = CrisisClassifier::default();
        assert_eq!(classifier.matched_keyword("there is no point anymore"), Some("no point"));
        assert_eq!(classifier.matched_keyword("sunny beach"), None);
    }

    #[test]
    fn custom_keywords_are_lowercased() {
        let classifier = CrisisClassifier::with_keywords(["Danger", ""]);
        assert_eq!(classifier.keywords(), &["danger".to_string()]);
        assert!(classifier.classify("DANGER ahead"));
    }

    fn mixed_case(text: &str, mask: &[bool]) -> String {
        text.chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        #[test]
        fn any_embedded_keyword_is_detected(
            prefix in "[a-zA-Z ,.!]{0,40}",
            suffix in "[a-zA-Z ,.!]{0,40}",
            index in 0..DEFAULT_CRISIS_KEYWORDS.len(),
            mask in proptest::collection::vec(any::<bool>(), 1..8),
        ) {
            let keyword = mixed_case(DEFAULT_CRISIS_KEYWORDS[index], &mask);
            let text = format!("{}{}{}", prefix, keyword, suffix);
            prop_assert!(CrisisClassifier::default().classify(&text));
        }

        #[test]
        fn text_without_keywords_is_not_detected(text in "[xzqjXZQJ0-9 ,.]{0,80}") {
            prop_assert!(!CrisisClassifier::default().classify(&text));
        }
    }
}
