// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake gateway for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{GatewayError, MessageGateway};
use ngp_core::{PeerMessage, Pdu};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Records every outbound message; can be switched to a closed transport
#[derive(Clone, Default)]
pub struct FakeGateway {
    sent: Arc<Mutex<Vec<PeerMessage>>>,
    closed: Arc<AtomicBool>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages handed over so far
    pub fn sent(&self) -> Vec<PeerMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of messages whose PDU satisfies `pred`
    pub fn count(&self, pred: impl Fn(&Pdu) -> bool) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|m| pred(&m.pdu))
            .count()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Make subsequent sends fail as if the transport went away
    pub fn set_closed(&self, closed: bool) {
        self.closed.store(closed, Ordering::SeqCst);
    }
}

impl MessageGateway for FakeGateway {
    fn send(&self, message: PeerMessage) -> Result<(), GatewayError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(GatewayError::Closed {
                entity: message.entity.to_string(),
                pdu: message.pdu.name(),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
