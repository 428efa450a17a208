//! Crisis resource configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Crisis resource settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafetyConfig {
    /// YAML file replacing the built-in helpline table
    pub resources_file: Option<PathBuf>,
}

impl SafetyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.resources_file {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired("SAFETY__RESOURCES_FILE"));
            }
        }
        Ok(())
    }
}
