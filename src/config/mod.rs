//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `DREAM_ANALYST` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use dream_analyst::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod safety;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use safety::SafetyConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; in-memory storage when absent
    pub database: Option<DatabaseConfig>,

    /// Access token signing
    pub auth: AuthConfig,

    /// Mistral text generation
    #[serde(default)]
    pub ai: AiConfig,

    /// Crisis resource table override
    #[serde(default)]
    pub safety: SafetyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DREAM_ANALYST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `DREAM_ANALYST__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DREAM_ANALYST__AI__MISTRAL_API_KEY=...` -> `ai.mistral_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DREAM_ANALYST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.safety.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
