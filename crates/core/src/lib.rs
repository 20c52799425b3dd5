// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! ngp-core: pure building blocks for the NG control-plane procedure engine
//!
//! This crate provides:
//! - NGAP message model (NG Setup, RAN Configuration Update)
//! - A logical-time timer service
//! - The retry-with-backoff procedure state machine
//! - The per-entity transaction registry
//! - Effects, events, and engine configuration

pub mod clock;
pub mod config;
pub mod id;
pub mod message;
pub mod registry;
pub mod timer;

// State machines and their outputs
pub mod effect;
pub mod procedure;
pub mod traced;

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock, TickPacer};
pub use config::{ConfigError, EngineConfig};
pub use effect::{Effect, Event};
pub use id::{EntityId, IdGen, ProcedureId, SequentialIdGen, UuidIdGen};
pub use message::{
    Cause, GlobalGnbId, NgSetupFailure, NgSetupRequest, NgSetupResponse, PagingDrx, Pdu,
    PeerMessage, RanConfigurationUpdate, RanConfigurationUpdateAcknowledge,
    RanConfigurationUpdateFailure, SupportedTa, TimeToWait,
};
pub use procedure::{
    AmfConnection, AmfConnectionEvent, AmfConnectionFailure, AmfConnectionOutcome,
    AmfConnectionState, NgSetup, NgSetupOutcome, Outcome, ProcedureEvent, ProcedureFailure,
    ProcedureRequest, ProcedureState, RanConfigUpdate, RanConfigUpdateOutcome, Reply,
    RetryOutcome, RetryProcedure, RetryProtocol, WaitingFor,
};
pub use registry::{RegistryError, TransactionRegistry};
pub use timer::{FiredTimer, TimerId, TimerService, DEFAULT_TICK};
pub use traced::TracedEffect;
