// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration

use crate::timer::DEFAULT_TICK;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the procedure engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock length of one logical tick
    #[serde(with = "humantime_serde")]
    pub tick: Duration,
    /// Retries after the first NG Setup attempt
    pub max_setup_retries: u32,
    /// Retries after the first RAN Configuration Update attempt
    pub max_config_update_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            max_setup_retries: 1,
            max_config_update_retries: 1,
        }
    }
}

impl EngineConfig {
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_max_setup_retries(mut self, retries: u32) -> Self {
        self.max_setup_retries = retries;
        self
    }

    pub fn with_max_config_update_retries(mut self, retries: u32) -> Self {
        self.max_config_update_retries = retries;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.is_zero() {
            return Err(ConfigError::Invalid {
                field: "tick",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
