//! User settings for SpendWise
//!
//! Manages the record store location, display preferences and logging level.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::SpendwisePaths;
use crate::error::SpendwiseError;

/// User settings for SpendWise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the record store API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Username used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Recent expenses shown on the dashboard
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Months covered by the trailing monthly trend
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_count() -> usize {
    5
}

fn default_trend_months() -> usize {
    6
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            username: None,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_count: default_recent_count(),
            trend_months: default_trend_months(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, SpendwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendwiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), SpendwiseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendwiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SpendwiseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
