//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRIAGE` prefix and nested values use `__` as a separator.
//!
//! # Example
//!
//! ```no_run
//! use triage_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod history;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use history::HistoryConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language-model provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// History store configuration
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `TRIAGE` prefix:
    ///
    /// - `TRIAGE__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `TRIAGE__AI__TIMEOUT_SECS=30` -> `ai.timeout_secs`
    /// - `TRIAGE__HISTORY__FILE_PATH=...` -> `history.file_path`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("TRIAGE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.history.validate()?;
        Ok(())
    }
}
