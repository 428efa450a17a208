//! Parsing of structured signals out of generated JSON.
//!
//! Every parse returns an [`Extraction`]: either the validated value or the
//! fixed fallback value together with the reason parsing failed.

use serde_json::Value;
use thiserror::Error;

use crate::domain::dream::Mood;

/// System instructions for keyword extraction.
pub const KEYWORD_INSTRUCTIONS: &str = "Extract 5-10 key thematic words or phrases from this dream analysis conversation.
Focus on important symbols, emotions, and interpretations.
Return ONLY a JSON object with a \"keywords\" field containing an array of strings.
Example: {\"keywords\": [\"flying\", \"falling\", \"childhood home\", \"water\", \"transformation\"]}";

/// System instructions for mood extraction.
pub const MOOD_INSTRUCTIONS: &str = "Analyze the emotional tone and mood of this dream.
Return ONLY a JSON object with \"mood\" (positive/neutral/negative/mysterious) and \"emotions\" (array of 2-3 key emotions).
Example: {\"mood\": \"mysterious\", \"emotions\": [\"curiosity\", \"anxiety\", \"wonder\"]}";

/// Why a signal fell back to its default.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("missing or invalid field '{0}'")]
    MissingField(&'static str),

    #[error("no keywords returned")]
    EmptyKeywords,
}

/// Result of extracting one signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Parsed(T),
    Fallback { value: T, reason: SignalError },
}

impl<T> Extraction<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Extraction::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Extraction::Parsed(value) | Extraction::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Extraction::Parsed(value) | Extraction::Fallback { value, .. } => value,
        }
    }
}

/// Mood label plus emotion tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodSignal {
    pub mood: Mood,
    pub emotions: Vec<String>,
}

impl MoodSignal {
    /// `("neutral", ["calm"])`.
    pub fn fallback() -> Self {
        Self {
            mood: Mood::Neutral,
            emotions: vec!["calm".to_string()],
        }
    }
}

/// `["dream", "analysis"]`.
pub fn fallback_keywords() -> Vec<String> {
    vec!["dream".to_string(), "analysis".to_string()]
}

/// Parses `{"keywords": [..]}`.
pub fn parse_keywords(raw: &str) -> Extraction<Vec<String>> {
    match keywords_from(raw) {
        Ok(keywords) => Extraction::Parsed(keywords),
        Err(reason) => keyword_fallback(reason),
    }
}

/// Fallback keywords carrying the failure reason.
pub fn keyword_fallback(reason: SignalError) -> Extraction<Vec<String>> {
    tracing::warn!(%reason, "Keyword extraction fell back to defaults");
    Extraction::Fallback {
        value: fallback_keywords(),
        reason,
    }
}

/// Parses `{"mood": "..", "emotions": [..]}`.
///
/// A mood label outside the four known values is clamped to neutral.
pub fn parse_mood(raw: &str) -> Extraction<MoodSignal> {
    match mood_from(raw) {
        Ok(signal) => Extraction::Parsed(signal),
        Err(reason) => mood_fallback(reason),
    }
}

/// Fallback mood carrying the failure reason.
pub fn mood_fallback(reason: SignalError) -> Extraction<MoodSignal> {
    tracing::warn!(%reason, "Mood extraction fell back to defaults");
    Extraction::Fallback {
        value: MoodSignal::fallback(),
        reason,
    }
}

fn keywords_from(raw: &str) -> Result<Vec<String>, SignalError> {
    let object = parse_object(raw)?;
    let keywords = string_array(object.get("keywords")).ok_or(SignalError::MissingField("keywords"))?;
    if keywords.is_empty() {
        return Err(SignalError::EmptyKeywords);
    }
    Ok(keywords)
}

fn mood_from(raw: &str) -> Result<MoodSignal, SignalError> {
    let object = parse_object(raw)?;
    let label = object
        .get("mood")
        .and_then(Value::as_str)
        .ok_or(SignalError::MissingField("mood"))?;
    let emotions = string_array(object.get("emotions")).ok_or(SignalError::MissingField("emotions"))?;

    let mood = label.parse::<Mood>().unwrap_or_else(|_| {
        tracing::warn!(label, "Mood label outside known values, clamping to neutral");
        Mood::Neutral
    });

    Ok(MoodSignal { mood, emotions })
}

fn parse_object(raw: &str) -> Result<serde_json::Map<String, Value>, SignalError> {
    let json = json_slice(raw);
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(SignalError::MalformedJson(format!(
            "expected object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(SignalError::MalformedJson(e.to_string())),
    }
}

/// Array of non-blank strings, trimmed. `None` if absent or not all strings.
fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let s = item.as_str()?.trim();
        if !s.is_empty() {
            out.push(s.to_string());
        }
    }
    Some(out)
}

/// Narrows a response to its JSON object, tolerating code fences and
/// surrounding prose.
fn json_slice(raw: &str) -> &str {
    let trimmed = raw.trim();

    for fence in ["```json", "```"] {
        if let Some(start) = trimmed.find(fence) {
            let body = &trimmed[start + fence.len()..];
            if let Some(end) = body.find("```") {
                return body[..end].trim();
            }
        }
    }

    match trimmed.find('{') {
        Some(start) => balanced_object(trimmed, start).unwrap_or(trimmed),
        None => trimmed,
    }
}

fn balanced_object(s: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_object() {
        let out = parse_keywords(r#"{"keywords": ["flying", " water ", ""]}"#);
        assert_eq!(out, Extraction::Parsed(vec!["flying".to_string(), "water".to_string()]));
    }

    #[test]
    fn keywords_inside_code_fence() {
        let out = parse_keywords("Here you go:\n```json\n{\"keywords\": [\"moon\"]}\n```");
        assert_eq!(out.into_value(), vec!["moon".to_string()]);
    }

    #[test]
    fn keywords_with_surrounding_prose() {
        let out = parse_keywords("Sure! {\"keywords\": [\"café\", \"}\"]} hope that helps");
        assert_eq!(out.into_value(), vec!["café".to_string(), "}".to_string()]);
    }

    #[test]
    fn malformed_keywords_fall_back() {
        let out = parse_keywords("not json at all");
        assert!(out.is_fallback());
        assert_eq!(out.value(), &vec!["dream".to_string(), "analysis".to_string()]);
        assert!(matches!(out, Extraction::Fallback { reason: SignalError::MalformedJson(_), .. }));
    }

    #[test]
    fn missing_or_empty_keywords_fall_back() {
        let missing = parse_keywords(r#"{"topics": ["x"]}"#);
        assert!(matches!(missing, Extraction::Fallback { reason: SignalError::MissingField("keywords"), .. }));

        let empty = parse_keywords(r#"{"keywords": []}"#);
        assert!(matches!(empty, Extraction::Fallback { reason: SignalError::EmptyKeywords, .. }));
    }

    #[test]
    fn non_string_keyword_is_invalid() {
        let out = parse_keywords(r#"{"keywords": ["ok", 3]}"#);
        assert!(matches!(out, Extraction::Fallback { reason: SignalError::MissingField("keywords"), .. }));
    }

    #[test]
    fn parses_mood_object() {
        let out = parse_mood(r#"{"mood": "Mysterious", "emotions": ["curiosity", "wonder"]}"#);
        assert_eq!(
            out,
            Extraction::Parsed(MoodSignal {
                mood: Mood::Mysterious,
                emotions: vec!["curiosity".to_string(), "wonder".to_string()],
            })
        );
    }

    #[test]
    fn unknown_mood_is_clamped_to_neutral() {
        let out = parse_mood(r#"{"mood": "ecstatic", "emotions": ["joy"]}"#);
        assert_eq!(
            out,
            Extraction::Parsed(MoodSignal {
                mood: Mood::Neutral,
                emotions: vec!["joy".to_string()],
            })
        );
    }

    #[test]
    fn malformed_mood_falls_back() {
        let out = parse_mood("{mood: positive");
        assert!(out.is_fallback());
        assert_eq!(out.into_value(), MoodSignal::fallback());
    }

    #[test]
    fn mood_missing_emotions_falls_back() {
        let out = parse_mood(r#"{"mood": "positive"}"#);
        assert!(matches!(out, Extraction::Fallback { reason: SignalError::MissingField("emotions"), .. }));
    }

    #[test]
    fn array_root_is_malformed() {
        let out = parse_mood(r#"["positive"]"#);
        assert!(matches!(out, Extraction::Fallback { reason: SignalError::MalformedJson(_), .. }));
    }

    #[test]
    fn fallback_values_are_fixed() {
        assert_eq!(fallback_keywords(), vec!["dream", "analysis"]);
        let mood = MoodSignal::fallback();
        assert_eq!(mood.mood, Mood::Neutral);
        assert_eq!(mood.emotions, vec!["calm"]);
    }
}
