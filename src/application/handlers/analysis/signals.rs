//! SignalExtractor - keywords and mood via JSON-mode generation.

use std::sync::Arc;

use super::orchestrator::purpose;
use crate::domain::signals::{
    keyword_fallback, mood_fallback, parse_keywords, parse_mood, Extraction, MoodSignal,
    SignalError, KEYWORD_INSTRUCTIONS, MOOD_INSTRUCTIONS,
};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Extracts structured signals, falling back to fixed defaults on any
/// failure.
#[derive(Clone)]
pub struct SignalExtractor {
    provider: Arc<dyn AIProvider>,
    temperature: f32,
}

impl SignalExtractor {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Thematic keywords of a dream transcript.
    pub async fn extract_keywords(&self, text: &str, metadata: RequestMetadata) -> Extraction<Vec<String>> {
        match self.json_call(KEYWORD_INSTRUCTIONS, text, metadata).await {
            Ok(raw) => parse_keywords(&raw),
            Err(reason) => keyword_fallback(reason),
        }
    }

    /// Mood label and emotions of a dream.
    pub async fn extract_mood(&self, text: &str, metadata: RequestMetadata) -> Extraction<MoodSignal> {
        match self.json_call(MOOD_INSTRUCTIONS, text, metadata).await {
            Ok(raw) => parse_mood(&raw),
            Err(reason) => mood_fallback(reason),
        }
    }

    async fn json_call(
        &self,
        instructions: &str,
        text: &str,
        metadata: RequestMetadata,
    ) -> Result<String, SignalError> {
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(instructions)
            .with_message(MessageRole::User, text)
            .with_temperature(self.temperature)
            .with_json_response();

        self.provider
            .complete(request)
            .await
            .map(|response| response.content)
            .map_err(|e| SignalError::Generation(e.to_string()))
    }
}

/// Metadata for a keyword call.
pub fn keyword_metadata() -> RequestMetadata {
    RequestMetadata::new(purpose::KEYWORDS)
}

/// Metadata for a mood call.
pub fn mood_metadata() -> RequestMetadata {
    RequestMetadata::new(purpose::MOOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::dream::Mood;
    use crate::ports::ResponseFormat;

    fn extractor(provider: &MockAIProvider) -> SignalExtractor {
        SignalExtractor::new(Arc::new(provider.clone()))
    }

    #[tokio::test]
    async fn keywords_are_parsed_from_json_mode_call() {
        let provider =
            MockAIProvider::new().with_response(r#"{"keywords": ["water", "childhood home"]}"#);
        let result = extractor(&provider)
            .extract_keywords("Dream: ...", keyword_metadata())
            .await;

        assert_eq!(
            result,
            Extraction::Parsed(vec!["water".to_string(), "childhood home".to_string()])
        );

        let call = &provider.get_calls()[0];
        assert_eq!(call.response_format, ResponseFormat::JsonObject);
        assert_eq!(call.temperature, Some(0.1));
        assert_eq!(call.system_prompt.as_deref(), Some(KEYWORD_INSTRUCTIONS));
    }

    #[tokio::test]
    async fn malformed_keywords_fall_back() {
        let provider = MockAIProvider::new().with_response("water, fire, earth");
        let result = extractor(&provider)
            .extract_keywords("Dream: ...", keyword_metadata())
            .await;

        assert!(result.is_fallback());
        assert_eq!(result.into_value(), vec!["dream", "analysis"]);
    }

    #[tokio::test]
    async fn failed_mood_call_falls_back_with_reason() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 5 });
        let result = extractor(&provider)
            .extract_mood("a dark forest", mood_metadata())
            .await;

        match result {
            Extraction::Fallback { value, reason } => {
                assert_eq!(value, MoodSignal::fallback());
                assert!(matches!(reason, SignalError::Generation(_)));
            }
            Extraction::Parsed(_) => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn mood_is_parsed() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"mood": "Mysterious", "emotions": ["curiosity", "wonder"]}"#);
        let signal = extractor(&provider)
            .extract_mood("a glowing door", mood_metadata())
            .await
            .into_value();

        assert_eq!(signal.mood, Mood::Mysterious);
        assert_eq!(signal.emotions, vec!["curiosity", "wonder"]);
    }
}
