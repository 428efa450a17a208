//! Crisis helpline table and resolver.
//!
//! The table is ordered; lookups against free text walk it in order and the
//! first key contained in the text wins. A YAML file can replace the built-in
//! table at startup.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const GLOBAL_RESOURCE: &str =
    "International Association for Suicide Prevention (IASP): https://findahelpline.com";

static BUILTIN: Lazy<ResourceTable> = Lazy::new(|| ResourceTable {
    countries: vec![
        CountryResource::new("india", "Tele-MANAS: 14416 (24/7), Parivarthan: +91-7676602602"),
        CountryResource::new(
            "united states",
            "988 Suicide & Crisis Lifeline, Crisis Text Line: Text HOME to 741741",
        ),
        CountryResource::new("uk", "Samaritans: 116 123, Shout: Text 85258"),
        CountryResource::new("united kingdom", "Samaritans: 116 123, Shout: Text 85258"),
        CountryResource::new("australia", "Lifeline: 13 11 14, Beyond Blue: 1300 22 4636"),
        CountryResource::new("canada", "Crisis Services Canada: 1-833-456-4566"),
    ],
    global: GLOBAL_RESOURCE.to_string(),
});

/// One country entry: lower-case key and helpline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResource {
    pub key: String,
    pub resource: String,
}

impl CountryResource {
    pub fn new(key: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            key: key.into().to_lowercase(),
            resource: resource.into(),
        }
    }
}

/// Errors loading a resource table from disk.
#[derive(Debug, Error)]
pub enum ResourceTableError {
    #[error("failed to read resource table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse resource table: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("resource table is invalid: {0}")]
    Invalid(String),
}

/// Ordered country table plus one global fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTable {
    pub countries: Vec<CountryResource>,
    pub global: String,
}

impl ResourceTable {
    /// Creates a table, normalizing keys to lower case.
    pub fn new(countries: Vec<CountryResource>, global: impl Into<String>) -> Self {
        Self {
            countries: countries
                .into_iter()
                .map(|c| CountryResource::new(c.key, c.resource))
                .collect(),
            global: global.into(),
        }
    }

    /// The table shipped with the service.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parses a table from YAML.
    ///
    /// ```yaml
    /// global: "International helplines: https://findahelpline.com"
    /// countries:
    ///   - key: canada
    ///     resource: "Crisis Services Canada: 1-833-456-4566"
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ResourceTableError> {
        let raw: ResourceTable = serde_yaml::from_str(yaml)?;
        let table = Self::new(raw.countries, raw.global);
        table.validate()?;
        Ok(table)
    }

    /// Reads and parses a YAML table from disk.
    pub fn from_file(path: &Path) -> Result<Self, ResourceTableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    fn validate(&self) -> Result<(), ResourceTableError> {
        if self.global.trim().is_empty() {
            return Err(ResourceTableError::Invalid("global resource is empty".into()));
        }
        if let Some(entry) = self
            .countries
            .iter()
            .find(|c| c.key.trim().is_empty() || c.resource.trim().is_empty())
        {
            return Err(ResourceTableError::Invalid(format!(
                "entry '{}' has an empty key or resource",
                entry.key
            )));
        }
        Ok(())
    }
}

/// Maps country keys to helpline strings.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    table: Arc<ResourceTable>,
}

impl ResourceResolver {
    pub fn new(table: ResourceTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Exact-key lookup. Empty or unknown keys resolve to the global resource.
    pub fn resolve(&self, country_key: &str) -> &str {
        if country_key.is_empty() {
            return &self.table.global;
        }
        self.table
            .countries
            .iter()
            .find(|c| c.key == country_key)
            .map(|c| c.resource.as_str())
            .unwrap_or(&self.table.global)
    }

    /// First table key (in table order) contained in `text`, case-insensitive.
    pub fn find_country_in(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.table
            .countries
            .iter()
            .find(|c| lowered.contains(c.key.as_str()))
            .map(|c| c.key.as_str())
    }

    pub fn global(&self) -> &str {
        &self.table.global
    }

    pub fn table(&self) -> &ResourceTable {
        &self.table
    }
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::new(ResourceTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolves_known_country() {
        let resolver = ResourceResolver::default();
        assert_eq!(resolver.resolve("canada"), "Crisis Services Canada: 1-833-456-4566");
    }

    #[test]
    fn unknown_and_empty_keys_fall_back_to_global() {
        let resolver = ResourceResolver::default();
        assert_eq!(resolver.resolve(""), GLOBAL_RESOURCE);
        assert_eq!(resolver.resolve("atlantis"), GLOBAL_RESOURCE);
    }

    #[test]
    fn resolve_is_exact_key() {
        let resolver = ResourceResolver::default();
        assert_eq!(resolver.resolve("Canada"), GLOBAL_RESOURCE);
    }

    #[test]
    fn find_country_uses_table_order() {
        let resolver = ResourceResolver::default();
        // "uk" precedes "united kingdom" in the table
        assert_eq!(resolver.find_country_in("I live in the United Kingdom, UK"), Some("uk"));
        assert_eq!(resolver.find_country_in("I am in CANADA"), Some("canada"));
        assert_eq!(resolver.find_country_in("somewhere else"), None);
    }

    #[test]
    fn substring_matching_is_heuristic() {
        // "uk" inside another word still counts
        let resolver = ResourceResolver::default();
        assert_eq!(resolver.find_country_in("my friend Luke"), Some("uk"));
    }

    #[test]
    fn injected_table_replaces_builtin() {
        let resolver = ResourceResolver::new(ResourceTable::new(
            vec![CountryResource::new("Narnia", "Aslan Line: 000")],
            "Global line",
        ));
        assert_eq!(resolver.resolve("narnia"), "Aslan Line: 000");
        assert_eq!(resolver.resolve("canada"), "Global line");
        assert_eq!(resolver.find_country_in("back in NARNIA"), Some("narnia"));
    }

    #[test]
    fn loads_table_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "global: \"Global helpline\"\ncountries:\n  - key: Ireland\n    resource: \"Samaritans Ireland: 116 123\"\n"
        )
        .unwrap();

        let table = ResourceTable::from_file(file.path()).unwrap();
        assert_eq!(table.countries.len(), 1);
        assert_eq!(table.countries[0].key, "ireland");
        assert_eq!(table.global, "Global helpline");
    }

    #[test]
    fn rejects_empty_global() {
        let err = ResourceTable::from_yaml_str("global: \"\"\ncountries: []\n").unwrap_err();
        assert!(matches!(err, ResourceTableError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = ResourceTable::from_yaml_str("countries: [oops").unwrap_err();
        assert!(matches!(err, ResourceTableError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ResourceTable::from_file(Path::new("/nonexistent/resources.yaml")).unwrap_err();
        assert!(matches!(err, ResourceTableError::Io(_)));
    }
}
