//! History store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// History store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Path of the JSON history file
    #[serde(default = "default_path")]
    pub file_path: PathBuf,
}

impl HistoryConfig {
    /// Validate history configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyHistoryPath);
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file_path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("triage_history.json")
}
