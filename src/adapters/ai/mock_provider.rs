//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests to run without calling the real generation API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Responses routed by request purpose, so concurrent calls stay deterministic
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response_for("mood", r#"{"mood":"positive","emotions":["joy"]}"#)
//!     .with_response("What a vivid dream!");
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Responses for any purpose (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Responses reserved for one request purpose.
    routed: Arc<Mutex<HashMap<&'static str, VecDeque<MockResponse>>>>,
    info: ProviderInfo,
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            routed: Arc::new(Mutex::new(HashMap::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the shared queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        locked(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
        });
        self
    }

    /// Adds an error response to the shared queue.
    pub fn with_error(self, error: MockError) -> Self {
        locked(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Adds a successful response used only for requests with `purpose`.
    pub fn with_response_for(self, purpose: &'static str, content: impl Into<String>) -> Self {
        self.push_routed(purpose, MockResponse::Success {
            content: content.into(),
        })
    }

    /// Adds an error used only for requests with `purpose`.
    pub fn with_error_for(self, purpose: &'static str, error: MockError) -> Self {
        self.push_routed(purpose, MockResponse::Error(error))
    }

    fn push_routed(self, purpose: &'static str, response: MockResponse) -> Self {
        locked(&self.routed)
            .entry(purpose)
            .or_default()
            .push_back(response);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }

    /// Returns recorded calls with the given purpose.
    pub fn calls_for(&self, purpose: &str) -> Vec<CompletionRequest> {
        locked(&self.calls)
            .iter()
            .filter(|c| c.metadata.purpose == purpose)
            .cloned()
            .collect()
    }

    /// Next response for `purpose`: routed first, then shared, then a default.
    fn next_response(&self, purpose: &str) -> MockResponse {
        if let Some(response) = locked(&self.routed)
            .get_mut(purpose)
            .and_then(VecDeque::pop_front)
        {
            return response;
        }
        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        // Pick the response before any await so ordering follows call order
        let response = self.next_response(request.metadata.purpose);
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match response {
            MockResponse::Success { content } => Ok(CompletionResponse {
                content,
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn request(purpose: &'static str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(purpose)).with_system_prompt("test")
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new().with_response("first").with_response("second");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("a")).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn returns_default_when_queue_empty() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.complete(request("a")).await.unwrap().content, "Mock response");
    }

    #[tokio::test]
    async fn routed_responses_take_precedence() {
        let provider = MockAIProvider::new()
            .with_response("shared")
            .with_response_for("mood", "{\"mood\":\"positive\"}");

        assert_eq!(provider.complete(request("chat")).await.unwrap().content, "shared");
        assert_eq!(
            provider.complete(request("mood")).await.unwrap().content,
            "{\"mood\":\"positive\"}"
        );
    }

    #[tokio::test]
    async fn returns_configured_errors() {
        let provider = MockAIProvider::new()
            .with_error(MockError::AuthenticationFailed)
            .with_error_for("mood", MockError::Timeout { timeout_secs: 5 });

        assert!(matches!(
            provider.complete(request("chat")).await,
            Err(AIError::AuthenticationFailed)
        ));
        assert!(matches!(
            provider.complete(request("mood")).await,
            Err(AIError::Timeout { timeout_secs: 5 })
        ));
    }

    #[tokio::test]
    async fn tracks_calls_by_purpose() {
        let provider = MockAIProvider::new();
        provider.complete(request("mood")).await.unwrap();
        provider.complete(request("keywords")).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.calls_for("mood").len(), 1);
        assert_eq!(provider.get_calls()[1].metadata.purpose, "keywords");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        assert_eq!(clone.complete(request("a")).await.unwrap().content, "shared");
        assert_eq!(provider.call_count(), 1);
    }
}
