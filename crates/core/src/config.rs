use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Configuration supplied by the embedding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for the per-symbol record files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Alpha Vantage API key. A blank or placeholder value is a fatal
    /// startup error, never a per-call one.
    pub api_key: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Key values that mean "nobody configured a real key". "demo" is the
/// Alpha Vantage sample key and only answers for MSFT.
const PLACEHOLDER_KEYS: &[&str] = &["your_api_key", "demo", "changeme"];

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            api_key: api_key.into(),
        }
    }

    /// Reject missing or placeholder API keys at startup.
    pub fn validate(&self) -> Result<(), CoreError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(CoreError::Config(
                "Alpha Vantage API key is not set".to_string(),
            ));
        }
        if PLACEHOLDER_KEYS.contains(&key.to_lowercase().as_str()) {
            return Err(CoreError::Config(format!(
                "Alpha Vantage API key '{key}' is a placeholder, set a real key"
            )));
        }
        Ok(())
    }
}
