use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::DatabaseConnection;
use crate::errors::StoreResult;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Database location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where the word and settings tables live
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DatabaseConfig {
    /// Database file; the user data directory is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Keep everything in memory for the lifetime of the process
    #[serde(default)]
    pub in_memory: bool,
}

impl DatabaseConfig {
    /// Open the configured database
    pub fn open(&self) -> StoreResult<DatabaseConnection> {
        if self.in_memory {
            return DatabaseConnection::new_in_memory();
        }

        match &self.path {
            Some(path) => DatabaseConnection::new(path),
            None => DatabaseConnection::new_default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("Database path must not be empty"));
            }
            if path.is_dir() {
                return Err(anyhow!("Database path is a directory: {:?}", path));
            }
        }

        Ok(())
    }

    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let file = File::open(config_path)
                .with_context(|| format!("Failed to open config file: {:?}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", config_path);

        let config = Config::default();
        config.save(config_path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", config_path))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database: DatabaseConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
