// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway backed by a tokio channel

use super::{GatewayError, MessageGateway};
use ngp_core::PeerMessage;
use tokio::sync::mpsc;

/// Forwards outbound messages to a task that owns the real transport
#[derive(Clone, Debug)]
pub struct ChannelGateway {
    tx: mpsc::UnboundedSender<PeerMessage>,
}

impl ChannelGateway {
    pub fn new(tx: mpsc::UnboundedSender<PeerMessage>) -> Self {
        Self { tx }
    }

    /// Create a gateway together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PeerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl MessageGateway for ChannelGateway {
    fn send(&self, message: PeerMessage) -> Result<(), GatewayError> {
        self.tx.send(message).map_err(|err| {
            let message = err.0;
            GatewayError::Closed {
                entity: message.entity.to_string(),
                pdu: message.pdu.name(),
            }
        })
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
