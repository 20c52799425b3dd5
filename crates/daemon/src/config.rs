// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! exit_when_settled = true
//!
//! [node]
//! gnb_id = 411
//! plmn = "00101"
//!
//! [amf]
//! entity = "amf-1"
//!
//! [peer]
//! reject_count = 1
//! time_to_wait = "1s"
//!
//! [engine]
//! tick = "1ms"
//! max_setup_retries = 1
//! ```

use crate::lifecycle::LifecycleError;
use crate::peer::PeerScript;
use ngp_core::{
    ConfigError, EngineConfig, EntityId, GlobalGnbId, NgSetupRequest, PagingDrx, SupportedTa,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identity of the RAN node this daemon speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub gnb_id: u32,
    pub gnb_id_bit_length: u8,
    pub plmn: String,
    pub tac: u32,
    pub ran_node_name: String,
    /// Entity the AMF connection procedure is registered under
    pub controller: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            gnb_id: 411,
            gnb_id_bit_length: 22,
            plmn: "00101".to_string(),
            tac: 7,
            ran_node_name: "srsgnb01".to_string(),
            controller: "ngc".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmfConfig {
    /// Entity identifier of the AMF association
    pub entity: String,
}

impl Default for AmfConfig {
    fn default() -> Self {
        Self {
            entity: "amf-1".to_string(),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node: NodeConfig,
    pub amf: AmfConfig,
    pub peer: PeerScript,
    pub engine: EngineConfig,
    /// Path to daemon log file; defaults to the user state directory
    pub log_path: Option<PathBuf>,
    /// Stop once the AMF connection procedure has settled
    pub exit_when_settled: bool,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.engine.validate()?;
        if !(22..=32).contains(&config.node.gnb_id_bit_length) {
            return Err(ConfigError::Invalid {
                field: "node.gnb_id_bit_length",
                reason: format!("{} is outside 22..=32", config.node.gnb_id_bit_length),
            });
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolved log file location
    pub fn log_path(&self) -> Result<PathBuf, LifecycleError> {
        if let Some(path) = &self.log_path {
            return Ok(path.clone());
        }
        let state = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .ok_or(LifecycleError::NoStateDir)?;
        Ok(state.join("ngp").join("ngpd.log"))
    }

    pub fn controller(&self) -> EntityId {
        EntityId::new(self.node.controller.clone())
    }

    pub fn amf(&self) -> EntityId {
        EntityId::new(self.amf.entity.clone())
    }

    /// NG Setup message describing this node
    pub fn setup_message(&self) -> NgSetupRequest {
        let node = &self.node;
        NgSetupRequest {
            global_gnb_id: GlobalGnbId {
                plmn: node.plmn.clone(),
                gnb_id: node.gnb_id,
                bit_length: node.gnb_id_bit_length,
            },
            ran_node_name: Some(node.ran_node_name.clone()),
            supported_ta_list: vec![SupportedTa {
                tac: node.tac,
                broadcast_plmns: vec![node.plmn.clone()],
            }],
            default_paging_drx: PagingDrx::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
