// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op gateway for when no peer is attached.

use super::{GatewayError, MessageGateway};
use ngp_core::PeerMessage;

/// Gateway that silently discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpGateway;

impl NoOpGateway {
    pub fn new() -> Self {
        Self
    }
}

impl MessageGateway for NoOpGateway {
    fn send(&self, _message: PeerMessage) -> Result<(), GatewayError> {
        Ok(())
    }
}
