#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for parklot
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/parklot/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use crate::core::{LoggingConfig, LotConfig};

use parklot_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lot: LotConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::APP_DIR)
            .join(constants::CONFIG_FILE))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, an I/O
    /// error if it cannot be read, and `ConfigError::ParseError` if the
    /// contents are not valid TOML for this structure.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(ConfigError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        debug!(path = %path.display(), "loaded config file");

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(capacity) = std::env::var(constants::ENV_CAPACITY) {
            self.lot.capacity = capacity.parse().map_err(|_| ConfigError::InvalidValue {
                field: constants::ENV_CAPACITY.to_string(),
                value: capacity,
            })?;
        }

        if let Ok(name) = std::env::var(constants::ENV_NAME) {
            self.lot.name = name;
        }

        if let Ok(level) = std::env::var(constants::ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        if let Ok(json) = std::env::var(constants::ENV_LOG_JSON) {
            self.logging.json = match json.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: constants::ENV_LOG_JSON.to_string(),
                        value: json,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Check values that parse fine but cannot describe a usable lot
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a zero capacity or an empty name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.lot.capacity == 0 {
            return Err(ConfigError::Invalid {
                message: "lot.capacity must be at least 1".to_string(),
            }
            .into());
        }
        if self.lot.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "lot.name must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
