// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound message gateways
//!
//! The engine hands every outbound PDU to a [`MessageGateway`]. Sending is
//! fire-and-forget: a failed hand-off is logged by the caller, and loss of
//! the link itself is reported through the engine's transport-lost path.

mod channel;
mod noop;

pub use channel::ChannelGateway;
pub use noop::NoOpGateway;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeGateway;

use ngp_core::PeerMessage;
use thiserror::Error;

/// Errors from handing a message to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("transport closed, dropped {pdu} for {entity}")]
    Closed { entity: String, pdu: &'static str },
}

/// Adapter for sending PDUs to remote entities
pub trait MessageGateway {
    /// Hand a message to the transport without waiting for delivery
    fn send(&self, message: PeerMessage) -> Result<(), GatewayError>;
}

impl<G: MessageGateway + ?Sized> MessageGateway for &G {
    fn send(&self, message: PeerMessage) -> Result<(), GatewayError> {
        (**self).send(message)
    }
}
