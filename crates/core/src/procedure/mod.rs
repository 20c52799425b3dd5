// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry-with-backoff procedure state machine
//!
//! A [`RetryProcedure`] drives one request/response exchange with a peer:
//! it sends the request, waits for a reply, and when the peer rejects with a
//! time-to-wait it arms a timer and re-sends once the wait is over. The
//! retry budget excludes the initial attempt, so `max_retries = N` allows
//! up to `N + 1` transmissions.
//!
//! The machine is pure: [`RetryProcedure::transition`] returns the next
//! state plus the [`Effect`]s the engine must carry out.

pub mod config_update;
pub mod connection;
pub mod ng_setup;

use crate::effect::{Effect, Event};
use crate::id::{EntityId, ProcedureId};
use crate::message::{Pdu, PeerMessage};
use std::fmt::Debug;
use std::time::Duration;

pub use config_update::{RanConfigUpdate, RanConfigUpdateOutcome};
pub use connection::{
    AmfConnection, AmfConnectionEvent, AmfConnectionFailure, AmfConnectionOutcome,
    AmfConnectionState,
};
pub use ng_setup::{NgSetup, NgSetupOutcome};

/// Request/response/failure exchange the skeleton is parameterised by
pub trait RetryProtocol: Clone + Debug + 'static {
    type Request: Clone + Debug + 'static;
    type Response: Clone + Debug + 'static;
    type Failure: Clone + Debug + 'static;

    /// Procedure kind, used for logs and to keep one instance per entity
    const KIND: &'static str;

    /// PDU sent on every attempt
    fn request_pdu(request: &Self::Request) -> Pdu;

    /// Recognise a reply belonging to this procedure
    fn match_reply(pdu: &Pdu) -> Option<Reply<Self::Response, Self::Failure>>;

    /// Peer-dictated wait carried by a failure; `None` makes the failure terminal
    fn time_to_wait(failure: &Self::Failure) -> Option<Duration>;

    /// Short human-readable reason for a failure
    fn describe(failure: &Self::Failure) -> String;
}

/// A reply from the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T, F> {
    Success(T),
    Failure(F),
}

/// Lifecycle state of a procedure instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureState {
    Created,
    AwaitingResponse,
    Backoff,
    Cancelled,
    Completed,
}

/// Suspension point an instance is parked on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitingFor {
    Nothing,
    Response,
    Timer,
    Procedure(ProcedureId),
}

/// Discriminated result stored once a procedure settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
    Cancelled,
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            Outcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Why a retry procedure failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureFailure<F> {
    /// The peer rejected without a time-to-wait
    Rejected(F),
    /// Every permitted attempt was rejected with a time-to-wait
    RetriesExhausted { last: F, attempts: u32 },
}

impl<F> ProcedureFailure<F> {
    /// The last failure received from the peer
    pub fn last_failure(&self) -> &F {
        match self {
            ProcedureFailure::Rejected(failure) => failure,
            ProcedureFailure::RetriesExhausted { last, .. } => last,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ProcedureFailure::RetriesExhausted { .. })
    }
}

/// Outcome of a retry procedure for protocol `P`
pub type RetryOutcome<P> = Outcome<
    <P as RetryProtocol>::Response,
    ProcedureFailure<<P as RetryProtocol>::Failure>,
>;

/// Parameters for launching a retry procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureRequest<R> {
    /// Peer the request is addressed to; also the registry key
    pub entity: EntityId,
    pub message: R,
    /// Retries permitted after the initial attempt
    pub max_retries: u32,
}

impl<R> ProcedureRequest<R> {
    pub fn new(entity: EntityId, message: R, max_retries: u32) -> Self {
        Self {
            entity,
            message,
            max_retries,
        }
    }
}

/// Inputs that drive a retry procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureEvent<T, F> {
    Launch,
    Reply(Reply<T, F>),
    TimerFired,
    Cancel,
}

/// Retry-with-backoff procedure instance
#[derive(Debug, Clone)]
pub struct RetryProcedure<P: RetryProtocol> {
    pub id: ProcedureId,
    pub entity: EntityId,
    pub request: P::Request,
    pub max_retries: u32,
    /// Retries performed so far (the initial attempt is not counted)
    pub attempts: u32,
    /// Requests handed to the gateway so far
    pub transmissions: u32,
    pub state: ProcedureState,
    pub last_failure: Option<P::Failure>,
    pub outcome: Option<RetryOutcome<P>>,
}

impl<P: RetryProtocol> RetryProcedure<P> {
    /// Create a new procedure in the Created state
    pub fn new(id: ProcedureId, request: ProcedureRequest<P::Request>) -> Self {
        Self {
            id,
            entity: request.entity,
            request: request.message,
            max_retries: request.max_retries,
            attempts: 0,
            transmissions: 0,
            state: ProcedureState::Created,
            last_failure: None,
            outcome: None,
        }
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(
        &self,
        event: ProcedureEvent<P::Response, P::Failure>,
    ) -> (RetryProcedure<P>, Vec<Effect>) {
        match (self.state, event) {
            // Created → AwaitingResponse
            (ProcedureState::Created, ProcedureEvent::Launch) => {
                let procedure = RetryProcedure {
                    state: ProcedureState::AwaitingResponse,
                    transmissions: 1,
                    ..self.clone()
                };
                let effects = procedure.send_request();
                (procedure, effects)
            }

            // AwaitingResponse → Completed(success)
            (ProcedureState::AwaitingResponse, ProcedureEvent::Reply(Reply::Success(response))) => {
                let procedure = RetryProcedure {
                    state: ProcedureState::Completed,
                    outcome: Some(Outcome::Success(response)),
                    ..self.clone()
                };
                let effects = vec![Effect::Emit(Event::ProcedureSucceeded {
                    id: self.id.clone(),
                })];
                (procedure, effects)
            }

            (ProcedureState::AwaitingResponse, ProcedureEvent::Reply(Reply::Failure(failure))) => {
                self.on_failure(failure)
            }

            // Backoff → AwaitingResponse (resend) or Completed(exhausted)
            (ProcedureState::Backoff, ProcedureEvent::TimerFired) => {
                if self.attempts < self.max_retries {
                    let procedure = RetryProcedure {
                        state: ProcedureState::AwaitingResponse,
                        attempts: self.attempts + 1,
                        transmissions: self.transmissions + 1,
                        ..self.clone()
                    };
                    let effects = procedure.send_request();
                    return (procedure, effects);
                }
                match &self.last_failure {
                    Some(last) => self.exhausted(last.clone()),
                    None => (self.clone(), vec![]),
                }
            }

            // Any live state → Cancelled
            (
                ProcedureState::Created
                | ProcedureState::AwaitingResponse
                | ProcedureState::Backoff,
                ProcedureEvent::Cancel,
            ) => {
                let procedure = RetryProcedure {
                    state: ProcedureState::Cancelled,
                    outcome: Some(Outcome::Cancelled),
                    ..self.clone()
                };
                let mut effects = Vec::new();
                if self.state == ProcedureState::Backoff {
                    effects.push(Effect::CancelTimer);
                }
                effects.push(Effect::Emit(Event::ProcedureCancelled {
                    id: self.id.clone(),
                }));
                (procedure, effects)
            }

            // Stale or invalid - no change
            _ => (self.clone(), vec![]),
        }
    }

    fn on_failure(&self, failure: P::Failure) -> (RetryProcedure<P>, Vec<Effect>) {
        let Some(delay) = P::time_to_wait(&failure) else {
            let reason = P::describe(&failure);
            let procedure = RetryProcedure {
                state: ProcedureState::Completed,
                outcome: Some(Outcome::Failure(ProcedureFailure::Rejected(failure))),
                ..self.clone()
            };
            let effects = vec![Effect::Emit(Event::ProcedureRejected {
                id: self.id.clone(),
                reason,
            })];
            return (procedure, effects);
        };

        // Out of budget: give up now instead of waiting for nothing
        if self.attempts >= self.max_retries {
            return self.exhausted(failure);
        }

        let procedure = RetryProcedure {
            state: ProcedureState::Backoff,
            last_failure: Some(failure),
            ..self.clone()
        };
        let effects = vec![
            Effect::StartTimer { delay },
            Effect::Emit(Event::BackoffStarted {
                id: self.id.clone(),
                attempt: self.attempts + 1,
                delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            }),
        ];
        (procedure, effects)
    }

    fn exhausted(&self, last: P::Failure) -> (RetryProcedure<P>, Vec<Effect>) {
        let attempts = self.transmissions;
        let procedure = RetryProcedure {
            state: ProcedureState::Completed,
            last_failure: Some(last.clone()),
            outcome: Some(Outcome::Failure(ProcedureFailure::RetriesExhausted {
                last,
                attempts,
            })),
            ..self.clone()
        };
        let effects = vec![Effect::Emit(Event::RetriesExhausted {
            id: self.id.clone(),
            attempts,
        })];
        (procedure, effects)
    }

    fn send_request(&self) -> Vec<Effect> {
        vec![
            Effect::Send(PeerMessage::new(
                self.entity.clone(),
                P::request_pdu(&self.request),
            )),
            Effect::Emit(Event::RequestSent {
                id: self.id.clone(),
                attempt: self.transmissions,
            }),
        ]
    }

    /// Suspension point for the current state
    pub fn waiting_for(&self) -> WaitingFor {
        match self.state {
            ProcedureState::AwaitingResponse => WaitingFor::Response,
            ProcedureState::Backoff => WaitingFor::Timer,
            _ => WaitingFor::Nothing,
        }
    }

    /// Check if the procedure is completed or cancelled
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            ProcedureState::Completed | ProcedureState::Cancelled
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == ProcedureState::Cancelled
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
