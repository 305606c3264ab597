//! Configuration management for the greenhouse temperature log
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with GHT_ prefix

use std::path::PathBuf;

use config::builder::{ConfigBuilder, DefaultState};
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Where the log and its CSV export live
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding both files
    pub data_dir: PathBuf,

    /// File name of the saved log
    pub log_file: String,

    /// File name of the CSV export
    pub csv_file: String,

    /// Re-write the CSV export whenever the log is saved
    pub export_csv_on_save: bool,
}

impl StorageConfig {
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("GHT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (GHT_ prefix)
            .add_source(
                Environment::with_prefix("GHT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.log_file", "SavedObservations.json")?
            .set_default("storage.csv_file", crate::services::export::DEFAULT_CSV_FILE_NAME)?
            .set_default("storage.export_csv_on_save", true)
    }
}
