// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and events for procedure orchestration

use crate::id::{EntityId, ProcedureId};
use crate::message::PeerMessage;
use crate::traced::TracedEffect;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effects are side effects that procedures request from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand a message to the outbound gateway
    Send(PeerMessage),
    /// Arm the procedure's timer, replacing any pending one
    StartTimer { delay: Duration },
    /// Release the procedure's pending timer, if any
    CancelTimer,
    /// Cancel another procedure (a sub-procedure being awaited)
    CancelProcedure { id: ProcedureId },
    /// Emit an event for observers and logs
    Emit(Event),
}

/// Events emitted by procedures and the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    ProcedureLaunched {
        id: ProcedureId,
        kind: String,
        entity: EntityId,
    },
    RequestSent {
        id: ProcedureId,
        attempt: u32,
    },
    BackoffStarted {
        id: ProcedureId,
        attempt: u32,
        delay_ms: u64,
    },
    ProcedureSucceeded {
        id: ProcedureId,
    },
    ProcedureRejected {
        id: ProcedureId,
        reason: String,
    },
    RetriesExhausted {
        id: ProcedureId,
        attempts: u32,
    },
    ProcedureCancelled {
        id: ProcedureId,
    },
    AmfConnected {
        entity: EntityId,
        amf_name: String,
    },
    AmfConnectionFailed {
        entity: EntityId,
        reason: String,
    },
    TransactionsLost {
        entities: Vec<EntityId>,
    },
}

impl Event {
    /// Get the event name for pattern matching
    /// Format: "category:action"
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProcedureLaunched { .. } => "procedure:launched",
            Event::RequestSent { .. } => "procedure:request_sent",
            Event::BackoffStarted { .. } => "procedure:backoff",
            Event::ProcedureSucceeded { .. } => "procedure:succeeded",
            Event::ProcedureRejected { .. } => "procedure:rejected",
            Event::RetriesExhausted { .. } => "procedure:exhausted",
            Event::ProcedureCancelled { .. } => "procedure:cancelled",
            Event::AmfConnected { .. } => "amf:connected",
            Event::AmfConnectionFailed { .. } => "amf:not_connected",
            Event::TransactionsLost { .. } => "transactions:lost",
        }
    }
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Send(_) => "send",
            Effect::StartTimer { .. } => "start_timer",
            Effect::CancelTimer => "cancel_timer",
            Effect::CancelProcedure { .. } => "cancel_procedure",
            Effect::Emit(_) => "emit",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Send(message) => vec![
                ("entity", message.entity.to_string()),
                ("pdu", message.pdu.name().to_string()),
            ],
            Effect::StartTimer { delay } => vec![("delay_ms", delay.as_millis().to_string())],
            Effect::CancelTimer => vec![],
            Effect::CancelProcedure { id } => vec![("procedure", id.to_string())],
            Effect::Emit(event) => vec![("event", event.name().to_string())],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
