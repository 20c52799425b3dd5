// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted AMF peer
//!
//! Stands in for the far end of the NG association: answers NG Setup with
//! a configurable number of rejections before accepting, acknowledges
//! every RAN Configuration Update, and answers any other PDU with an
//! Error Indication.

use ngp_core::{
    Cause, NgSetupFailure, NgSetupResponse, Pdu, PeerMessage,
    RanConfigurationUpdateAcknowledge, TimeToWait,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Behaviour of the simulated AMF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeerScript {
    /// NG Setup requests rejected before one is accepted
    pub reject_count: u32,
    /// TimeToWait attached to each rejection; absent means terminal
    pub time_to_wait: Option<TimeToWait>,
    pub amf_name: String,
    pub relative_capacity: u8,
}

impl Default for PeerScript {
    fn default() -> Self {
        Self {
            reject_count: 0,
            time_to_wait: None,
            amf_name: "open5gs-amf0".to_string(),
            relative_capacity: 255,
        }
    }
}

/// AMF that replies according to a [`PeerScript`]
#[derive(Debug, Clone)]
pub struct SimulatedAmf {
    script: PeerScript,
    rejected: u32,
}

impl SimulatedAmf {
    pub fn new(script: PeerScript) -> Self {
        Self {
            script,
            rejected: 0,
        }
    }

    /// Reply to one inbound message, if it warrants one
    pub fn respond(&mut self, message: PeerMessage) -> Option<PeerMessage> {
        let reply = match message.pdu {
            Pdu::NgSetupRequest(request) => {
                if self.rejected < self.script.reject_count {
                    self.rejected += 1;
                    Pdu::NgSetupFailure(NgSetupFailure {
                        cause: Cause::Misc("unspecified".to_string()),
                        time_to_wait: self.script.time_to_wait,
                    })
                } else {
                    Pdu::NgSetupResponse(NgSetupResponse {
                        amf_name: self.script.amf_name.clone(),
                        relative_amf_capacity: self.script.relative_capacity,
                        plmn_support_list: vec![request.global_gnb_id.plmn],
                    })
                }
            }
            Pdu::RanConfigurationUpdate(_) => {
                Pdu::RanConfigurationUpdateAcknowledge(RanConfigurationUpdateAcknowledge {})
            }
            Pdu::ErrorIndication { cause } => {
                debug!(%cause, "peer received error indication");
                return None;
            }
            other => {
                debug!(pdu = other.name(), "peer rejecting unexpected pdu");
                Pdu::ErrorIndication {
                    cause: Cause::Protocol(
                        "message-not-compatible-with-receiver-state".to_string(),
                    ),
                }
            }
        };
        Some(PeerMessage::new(message.entity, reply))
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Serve requests until either side of the association closes
    pub async fn run(
        mut self,
        mut requests: UnboundedReceiver<PeerMessage>,
        replies: UnboundedSender<PeerMessage>,
    ) {
        while let Some(message) = requests.recv().await {
            let Some(reply) = self.respond(message) else {
                continue;
            };
            debug!(entity = %reply.entity, pdu = reply.pdu.name(), "peer reply");
            if replies.send(reply).is_err() {
                break;
            }
        }
        info!(rejected = self.rejected, "peer stopped");
    }
}

#[cfg(test)]
#[path = "peer_tests.rs"]
mod tests;
