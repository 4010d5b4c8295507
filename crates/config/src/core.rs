//! Configuration sections

use parklot_errors::LotError;
use parklot_types::Capacity;
use serde::{Deserialize, Serialize};

/// Settings for the lot itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl LotConfig {
    /// Validated capacity
    ///
    /// # Errors
    ///
    /// Returns `LotError::InvalidCapacity` if the configured capacity is zero.
    pub fn capacity(&self) -> Result<Capacity, LotError> {
        Capacity::new(self.capacity)
    }
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            capacity: default_capacity(),
        }
    }
}

/// Log output settings, consumed by the binary when installing a subscriber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions for serde
fn default_name() -> String {
    "lot".to_string()
}

fn default_capacity() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}
