// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::gateway::{GatewayError, MessageGateway};
use ngp_core::PeerMessage;

/// Wrapper that adds tracing to any MessageGateway
#[derive(Clone, Debug)]
pub struct TracedGateway<G> {
    inner: G,
}

impl<G> TracedGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: MessageGateway> MessageGateway for TracedGateway<G> {
    fn send(&self, message: PeerMessage) -> Result<(), GatewayError> {
        let span = tracing::info_span!(
            "gateway.send",
            entity = %message.entity,
            pdu = message.pdu.name()
        );
        let _guard = span.enter();

        let result = self.inner.send(message);
        match &result {
            Ok(()) => tracing::debug!("sent"),
            Err(e) => tracing::warn!(error = %e, "send failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
