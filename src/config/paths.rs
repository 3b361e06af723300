//! Path management for SpendWise
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDWISE_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/spendwise` on Linux, `%APPDATA%\spendwise\config` on Windows)

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::SpendwiseError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SPENDWISE_CONFIG_DIR";

/// Manages all paths used by SpendWise
#[derive(Debug, Clone)]
pub struct SpendwisePaths {
    /// Base directory for SpendWise configuration
    base_dir: PathBuf,
}

impl SpendwisePaths {
    /// Create a new SpendwisePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, SpendwiseError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SpendwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), SpendwiseError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SpendwiseError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SpendwiseError> {
    ProjectDirs::from("", "", "spendwise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SpendwiseError::Config("Could not determine home directory".into()))
}
