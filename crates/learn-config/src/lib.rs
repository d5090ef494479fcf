//! # learn-config
//!
//! Layered configuration loading for sqlearn using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SQLEARN_*` prefix, `__` as separator)
//! 2. Project-level `.sqlearn/config.toml`
//! 3. User-level `~/.config/sqlearn/config.toml`
//! 4. Built-in defaults
//!
//! `SQLEARN_TUTOR__START_LESSON=3` maps to `tutor.start_lesson`.
//!
//! ```no_run
//! use learn_config::LearnConfig;
//!
//! let config = LearnConfig::load_with_dotenv().expect("config");
//! println!("starting at lesson {}", config.tutor.start_lesson);
//! ```

mod engine;
mod error;
mod tutor;

pub use engine::{EngineConfig, EngineSourceConfig, MEMORY_LOCATION};
pub use error::ConfigError;
pub use tutor::TutorSettings;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".sqlearn/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LearnConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub tutor: TutorSettings,
}

impl LearnConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does not read `.env`; use [`LearnConfig::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the working directory first, then [`LearnConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary provider chain.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SQLEARN_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.tutor.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sqlearn").join("config.toml"))
    }
}
