// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-plane messages exchanged with the peer core-network function
//!
//! Only the information elements the procedures need are modelled. Encoding
//! to and from the wire format happens outside this workspace.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Peer-dictated wait before a retry is permitted (TS 38.413 TimeToWait)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeToWait {
    #[serde(rename = "1s")]
    V1s,
    #[serde(rename = "2s")]
    V2s,
    #[serde(rename = "5s")]
    V5s,
    #[serde(rename = "10s")]
    V10s,
    #[serde(rename = "20s")]
    V20s,
    #[serde(rename = "60s")]
    V60s,
}

impl TimeToWait {
    pub fn as_duration(self) -> Duration {
        let secs = match self {
            TimeToWait::V1s => 1,
            TimeToWait::V2s => 2,
            TimeToWait::V5s => 5,
            TimeToWait::V10s => 10,
            TimeToWait::V20s => 20,
            TimeToWait::V60s => 60,
        };
        Duration::from_secs(secs)
    }

    /// Map a whole number of seconds onto the enumerated value, if it is one
    pub fn from_secs(secs: u64) -> Option<Self> {
        match secs {
            1 => Some(TimeToWait::V1s),
            2 => Some(TimeToWait::V2s),
            5 => Some(TimeToWait::V5s),
            10 => Some(TimeToWait::V10s),
            20 => Some(TimeToWait::V20s),
            60 => Some(TimeToWait::V60s),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeToWait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.as_duration().as_secs())
    }
}

/// Failure cause carried by rejections and error indications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "group", content = "value", rename_all = "snake_case")]
pub enum Cause {
    RadioNetwork(String),
    Transport(String),
    Protocol(String),
    Misc(String),
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cause::RadioNetwork(v) => write!(f, "radio-network:{}", v),
            Cause::Transport(v) => write!(f, "transport:{}", v),
            Cause::Protocol(v) => write!(f, "protocol:{}", v),
            Cause::Misc(v) => write!(f, "misc:{}", v),
        }
    }
}

/// Default paging DRX cycle in radio frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PagingDrx {
    V32,
    V64,
    #[default]
    V128,
    V256,
}

/// Global RAN node identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalGnbId {
    /// PLMN identity as MCC+MNC digits, e.g. "00101"
    pub plmn: String,
    pub gnb_id: u32,
    /// gNB ID bit length (22..=32)
    pub bit_length: u8,
}

/// Tracking area served by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedTa {
    pub tac: u32,
    pub broadcast_plmns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgSetupRequest {
    pub global_gnb_id: GlobalGnbId,
    pub ran_node_name: Option<String>,
    pub supported_ta_list: Vec<SupportedTa>,
    pub default_paging_drx: PagingDrx,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgSetupResponse {
    pub amf_name: String,
    pub relative_amf_capacity: u8,
    pub plmn_support_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgSetupFailure {
    pub cause: Cause,
    pub time_to_wait: Option<TimeToWait>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanConfigurationUpdate {
    pub ran_node_name: Option<String>,
    pub supported_ta_list: Vec<SupportedTa>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RanConfigurationUpdateAcknowledge {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanConfigurationUpdateFailure {
    pub cause: Cause,
    pub time_to_wait: Option<TimeToWait>,
}

/// Decoded protocol data unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pdu {
    NgSetupRequest(NgSetupRequest),
    NgSetupResponse(NgSetupResponse),
    NgSetupFailure(NgSetupFailure),
    RanConfigurationUpdate(RanConfigurationUpdate),
    RanConfigurationUpdateAcknowledge(RanConfigurationUpdateAcknowledge),
    RanConfigurationUpdateFailure(RanConfigurationUpdateFailure),
    ErrorIndication { cause: Cause },
}

impl Pdu {
    pub fn name(&self) -> &'static str {
        match self {
            Pdu::NgSetupRequest(_) => "ng_setup_request",
            Pdu::NgSetupResponse(_) => "ng_setup_response",
            Pdu::NgSetupFailure(_) => "ng_setup_failure",
            Pdu::RanConfigurationUpdate(_) => "ran_configuration_update",
            Pdu::RanConfigurationUpdateAcknowledge(_) => "ran_configuration_update_ack",
            Pdu::RanConfigurationUpdateFailure(_) => "ran_configuration_update_failure",
            Pdu::ErrorIndication { .. } => "error_indication",
        }
    }
}

/// A PDU addressed to or received from a peer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerMessage {
    pub entity: EntityId,
    pub pdu: Pdu,
}

impl PeerMessage {
    pub fn new(entity: EntityId, pdu: Pdu) -> Self {
        Self { entity, pdu }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
