//! Station configuration.
//!
//! Values come from a TOML file (optional) and are then overridden by
//! `BASE_STATION_*` environment variables:
//!
//! ```toml
//! builder_code = "bc_base_station"
//! counter_address = "0x7a9Ec1d04904907De0ED7b6839CcdD59c3716AC9"
//! celebration_ms = 2500
//! receipt_timeout_secs = 120
//!
//! [addresses]
//! social-post = "0x1685288Ac824609262548e485aE0427104e74817"
//! ```

use crate::core::constants::DEFAULT_CELEBRATION;
use crate::error::{Result, StationError};
use crate::types::ActionId;
use alloy_primitives::Address;
use base_station_interface::contracts::TAP_COUNTER_ADDRESS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const ENV_BUILDER_CODE: &str = "BASE_STATION_BUILDER_CODE";
pub const ENV_COUNTER_ADDRESS: &str = "BASE_STATION_COUNTER_ADDRESS";
pub const ENV_CELEBRATION_MS: &str = "BASE_STATION_CELEBRATION_MS";
pub const ENV_RECEIPT_TIMEOUT_SECS: &str = "BASE_STATION_RECEIPT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Integrator identifier encoded into the attribution suffix
    pub builder_code: String,

    /// Shared counter contract (target of `tap` and `count`)
    pub counter_address: Address,

    /// Per-action target overrides
    pub addresses: BTreeMap<ActionId, Address>,

    /// How long the success notification stays up
    pub celebration_ms: u64,

    /// Give up waiting for a receipt after this long. `None` waits forever.
    pub receipt_timeout_secs: Option<u64>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            builder_code: String::new(),
            counter_address: TAP_COUNTER_ADDRESS,
            addresses: BTreeMap::new(),
            celebration_ms: DEFAULT_CELEBRATION.as_millis() as u64,
            receipt_timeout_secs: None,
        }
    }
}

impl StationConfig {
    pub fn with_builder_code(mut self, code: impl Into<String>) -> Self {
        self.builder_code = code.into();
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StationError::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StationError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from an optional file, then apply the environment and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn merge_with_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup(ENV_BUILDER_CODE) {
            self.builder_code = code;
        }
        if let Some(address) = lookup(ENV_COUNTER_ADDRESS) {
            self.counter_address = address.trim().parse().map_err(|_| {
                StationError::Config(format!("Invalid address in {}", ENV_COUNTER_ADDRESS))
            })?;
        }
        if let Some(ms) = lookup(ENV_CELEBRATION_MS) {
            self.celebration_ms = ms.trim().parse().map_err(|_| {
                StationError::Config(format!("Invalid duration in {}", ENV_CELEBRATION_MS))
            })?;
        }
        if let Some(secs) = lookup(ENV_RECEIPT_TIMEOUT_SECS) {
            self.receipt_timeout_secs = Some(secs.trim().parse().map_err(|_| {
                StationError::Config(format!("Invalid timeout in {}", ENV_RECEIPT_TIMEOUT_SECS))
            })?);
        }
        Ok(())
    }

    /// Check the addresses and durations. The builder code is checked by
    /// the attribution encoder when the session is built.
    pub fn validate(&self) -> Result<()> {
        if self.counter_address == Address::ZERO {
            return Err(StationError::Config(
                "counter_address must not be the zero address".to_string(),
            ));
        }
        if let Some((id, _)) = self.addresses.iter().find(|(_, a)| **a == Address::ZERO) {
            return Err(StationError::Config(format!(
                "address for {} must not be the zero address",
                id
            )));
        }
        if self.celebration_ms == 0 {
            return Err(StationError::Config(
                "celebration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn celebration_duration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    pub fn receipt_timeout(&self) -> Option<Duration> {
        self.receipt_timeout_secs.map(Duration::from_secs)
    }
}
