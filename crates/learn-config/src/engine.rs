//! Engine source configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Location value selecting an in-memory database.
pub const MEMORY_LOCATION: &str = ":memory:";

/// One place the SQL engine can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineSourceConfig {
    /// Human-readable name shown in logs and load errors.
    pub label: String,

    /// `:memory:` or a directory that receives one scratch file per database.
    pub location: String,
}

impl EngineSourceConfig {
    #[must_use]
    pub fn new(label: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: location.into(),
        }
    }

    #[must_use]
    pub fn memory() -> Self {
        Self::new("memory", MEMORY_LOCATION)
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.location == MEMORY_LOCATION
    }
}

fn default_sources() -> Vec<EngineSourceConfig> {
    let mut sources = Vec::with_capacity(2);
    if let Some(cache) = dirs::cache_dir() {
        sources.push(EngineSourceConfig::new(
            "cache",
            cache.join("sqlearn").to_string_lossy(),
        ));
    }
    sources.push(EngineSourceConfig::memory());
    sources
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Sources tried in order; the first that loads wins.
    #[serde(default = "default_sources")]
    pub sources: Vec<EngineSourceConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

impl EngineConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::invalid(
                "engine.sources",
                "at least one engine source is required",
            ));
        }
        if let Some(source) = self.sources.iter().find(|s| s.location.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "engine.sources",
                format!("source '{}' has an empty location", source.label),
            ));
        }
        Ok(())
    }
}
