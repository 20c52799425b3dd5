// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AMF connection procedure
//!
//! Composite procedure owned by the NG controller: it runs an NG Setup
//! against the AMF as a sub-procedure, suspends until that settles, and
//! reports whether the AMF is connected.

use super::{NgSetupOutcome, Outcome, ProcedureFailure, WaitingFor};
use crate::effect::{Effect, Event};
use crate::id::{EntityId, ProcedureId};
use crate::message::NgSetupFailure;
use std::fmt;

pub const KIND: &str = "amf_connection";

/// Why the AMF could not be connected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmfConnectionFailure {
    /// The NG Setup sub-procedure failed
    Setup(ProcedureFailure<NgSetupFailure>),
    /// The NG Setup sub-procedure was cancelled underneath us
    SetupCancelled,
}

impl fmt::Display for AmfConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmfConnectionFailure::Setup(ProcedureFailure::Rejected(failure)) => {
                write!(f, "setup rejected: {}", failure.cause)
            }
            AmfConnectionFailure::Setup(ProcedureFailure::RetriesExhausted { attempts, .. }) => {
                write!(f, "setup retries exhausted after {} attempts", attempts)
            }
            AmfConnectionFailure::SetupCancelled => write!(f, "setup cancelled"),
        }
    }
}

/// Outcome of an AMF connection: the connected AMF's name on success
pub type AmfConnectionOutcome = Outcome<String, AmfConnectionFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmfConnectionState {
    Created,
    AwaitingSetup,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmfConnectionEvent {
    Launch,
    /// The awaited NG Setup settled with this outcome
    SetupSettled(NgSetupOutcome),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct AmfConnection {
    pub id: ProcedureId,
    /// Controller entity the connection is registered under
    pub entity: EntityId,
    /// AMF the setup runs against
    pub amf: EntityId,
    /// The NG Setup sub-procedure
    pub setup: ProcedureId,
    pub state: AmfConnectionState,
    pub outcome: Option<AmfConnectionOutcome>,
}

impl AmfConnection {
    pub fn new(id: ProcedureId, entity: EntityId, amf: EntityId, setup: ProcedureId) -> Self {
        Self {
            id,
            entity,
            amf,
            setup,
            state: AmfConnectionState::Created,
            outcome: None,
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, event: AmfConnectionEvent) -> (AmfConnection, Vec<Effect>) {
        match (self.state, event) {
            (AmfConnectionState::Created, AmfConnectionEvent::Launch) => {
                let connection = AmfConnection {
                    state: AmfConnectionState::AwaitingSetup,
                    ..self.clone()
                };
                (connection, vec![])
            }

            (AmfConnectionState::AwaitingSetup, AmfConnectionEvent::SetupSettled(setup)) => {
                let (outcome, event) = match setup {
                    Outcome::Success(response) => (
                        Outcome::Success(response.amf_name.clone()),
                        Event::AmfConnected {
                            entity: self.amf.clone(),
                            amf_name: response.amf_name,
                        },
                    ),
                    Outcome::Failure(failure) => {
                        let failure = AmfConnectionFailure::Setup(failure);
                        let event = Event::AmfConnectionFailed {
                            entity: self.amf.clone(),
                            reason: failure.to_string(),
                        };
                        (Outcome::Failure(failure), event)
                    }
                    Outcome::Cancelled => {
                        let failure = AmfConnectionFailure::SetupCancelled;
                        let event = Event::AmfConnectionFailed {
                            entity: self.amf.clone(),
                            reason: failure.to_string(),
                        };
                        (Outcome::Failure(failure), event)
                    }
                };
                let connection = AmfConnection {
                    state: AmfConnectionState::Completed,
                    outcome: Some(outcome),
                    ..self.clone()
                };
                (connection, vec![Effect::Emit(event)])
            }

            (
                AmfConnectionState::Created | AmfConnectionState::AwaitingSetup,
                AmfConnectionEvent::Cancel,
            ) => {
                let connection = AmfConnection {
                    state: AmfConnectionState::Cancelled,
                    outcome: Some(Outcome::Cancelled),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::CancelProcedure {
                        id: self.setup.clone(),
                    },
                    Effect::Emit(Event::ProcedureCancelled {
                        id: self.id.clone(),
                    }),
                ];
                (connection, effects)
            }

            _ => (self.clone(), vec![]),
        }
    }

    pub fn waiting_for(&self) -> WaitingFor {
        match self.state {
            AmfConnectionState::AwaitingSetup => WaitingFor::Procedure(self.setup.clone()),
            _ => WaitingFor::Nothing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            AmfConnectionState::Completed | AmfConnectionState::Cancelled
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == AmfConnectionState::Cancelled
    }
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
