//! Configuration for the pincode lookup terminal
//!
//! A small YAML file controls the lookup endpoint and logging. Every field
//! has a default, so running without a config file targets the public
//! service with info-level logging — the file only exists to point the app
//! at a mock service or to tune timeouts and log output.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::client::{DEFAULT_TIMEOUT_MS, POSTAL_API_BASE};
use crate::errors::PinseekError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PinseekConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PinseekConfig {
    /// Check values that would otherwise surface much later as opaque
    /// request failures.
    pub fn validate(&self) -> Result<(), PinseekError> {
        if self.api.base_url.trim().is_empty() {
            return Err(PinseekError::ConfigError(
                "API base URL cannot be empty".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(PinseekError::ConfigError(format!(
                "API base URL must start with http:// or https://: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_ms == 0 {
            return Err(PinseekError::ConfigError(
                "API timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Lookup service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Logs go to a file because the terminal itself is
    /// owned by the UI while the app runs.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_base_url() -> String {
    POSTAL_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "pinseek.log".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Loads configuration from YAML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<PinseekConfig, PinseekError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            PinseekError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_str(content: &str) -> Result<PinseekConfig, PinseekError> {
        serde_yaml::from_str(content)
            .map_err(|e| PinseekError::ConfigError(format!("Failed to parse YAML config: {}", e)))
    }
}
