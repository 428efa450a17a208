//! Text generation configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Mistral API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Mistral API key
    pub mistral_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Temperature for interpretations and chat replies
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,

    /// Temperature for keyword and mood extraction
    #[serde(default = "default_extraction_temperature")]
    pub extraction_temperature: f32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.mistral_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__MISTRAL_API_KEY"));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        for temperature in [self.chat_temperature, self.extraction_temperature] {
            if !(0.0..=1.5).contains(&temperature) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            mistral_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            chat_temperature: default_chat_temperature(),
            extraction_temperature: default_extraction_temperature(),
        }
    }
}

fn default_model() -> String {
    "mistral-large-latest".to_string()
}

fn default_base_url() -> String {
    "https://api.mistral.ai/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_extraction_temperature() -> f32 {
    0.1
}
