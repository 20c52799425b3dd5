// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup, pacing, and shutdown

use crate::config::Config;
use crate::peer::SimulatedAmf;
use ngp_adapters::{ChannelGateway, TracedGateway};
use ngp_core::{
    AmfConnectionOutcome, Clock, ConfigError, Event, Outcome, PeerMessage, SystemClock,
    TickPacer, UuidIdGen,
};
use ngp_engine::{Engine, EngineError, ProcedureHandle};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Startup marker prefix written to the log before tracing starts.
/// Full format: "--- ngpd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- ngpd: starting (pid: ";

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Launch failed: {0}")]
    Launch(#[from] EngineError),
}

/// Summary printed when the daemon stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// One of "connected", "failed", "cancelled" or "pending"
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amf_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Logical ticks that elapsed
    pub ticks: u64,
    /// NG Setup transmissions, retries included
    pub setup_requests: u32,
    /// Entities whose transactions were torn down at shutdown
    pub lost: Vec<String>,
}

/// Running daemon state
pub struct Daemon<C: Clock = SystemClock> {
    engine: Engine<TracedGateway<ChannelGateway>, UuidIdGen>,
    connection: ProcedureHandle<AmfConnectionOutcome>,
    /// Replies from the peer, fed back through [`Daemon::deliver`]
    pub inbound: UnboundedReceiver<PeerMessage>,
    pacer: TickPacer<C>,
    setup_requests: u32,
    peer: JoinHandle<()>,
}

impl Daemon<SystemClock> {
    /// Start the daemon against the wall clock
    pub fn startup(config: &Config) -> Result<Self, LifecycleError> {
        Self::startup_with_clock(config, SystemClock)
    }
}

impl<C: Clock> Daemon<C> {
    /// Spawn the peer and launch the AMF connection.
    ///
    /// Must be called from within a tokio runtime.
    pub fn startup_with_clock(config: &Config, clock: C) -> Result<Self, LifecycleError> {
        let (gateway, requests) = ChannelGateway::channel();
        let (replies, inbound) = mpsc::unbounded_channel();
        let peer = tokio::spawn(SimulatedAmf::new(config.peer.clone()).run(requests, replies));

        let mut engine = Engine::new(
            TracedGateway::new(gateway),
            UuidIdGen,
            config.engine.clone(),
        );
        let request = engine.setup_request(config.amf(), config.setup_message());
        let connection = match engine.launch_amf_connection(config.controller(), request) {
            Ok(handle) => handle,
            Err(e) => {
                peer.abort();
                return Err(e.into());
            }
        };
        info!(amf = %config.amf(), controller = %config.controller(), "amf connection launched");

        let mut daemon = Self {
            engine,
            connection,
            inbound,
            pacer: TickPacer::new(clock, config.engine.tick),
            setup_requests: 0,
            peer,
        };
        daemon.tally();
        Ok(daemon)
    }

    /// Feed one peer reply into the engine
    pub fn deliver(&mut self, message: PeerMessage) {
        if !self.engine.handle_message(message) {
            debug!("peer reply matched no procedure");
        }
        self.tally();
    }

    /// Advance logical time by however many ticks the clock says are due
    pub fn tick(&mut self) -> u64 {
        let due = self.pacer.due();
        if due > 0 {
            self.engine.advance_by(due);
            self.tally();
        }
        due
    }

    pub fn tick_length(&self) -> std::time::Duration {
        self.pacer.tick()
    }

    /// Whether the AMF connection has reached an outcome
    pub fn settled(&self) -> bool {
        self.connection.ready()
    }

    /// Tear down outstanding transactions and stop the peer
    pub fn shutdown(mut self) -> Report {
        let lost = self.engine.on_transport_lost();
        self.tally();
        self.peer.abort();

        let (outcome, amf_name, reason) = match self.connection.try_get() {
            Some(Outcome::Success(name)) => ("connected", Some(name.clone()), None),
            Some(Outcome::Failure(failure)) => ("failed", None, Some(failure.to_string())),
            Some(Outcome::Cancelled) => ("cancelled", None, None),
            None => ("pending", None, None),
        };
        let report = Report {
            outcome,
            amf_name,
            reason,
            ticks: self.engine.now(),
            setup_requests: self.setup_requests,
            lost: lost.iter().map(ToString::to_string).collect(),
        };
        info!(outcome = report.outcome, ticks = report.ticks, "daemon stopped");
        report
    }

    fn tally(&mut self) {
        for event in self.engine.drain_events() {
            if let Event::RequestSent { .. } = event {
                self.setup_requests += 1;
            }
        }
    }
}

/// Append the startup marker to the log file
pub fn write_startup_marker(log_path: &Path) -> Result<(), LifecycleError> {
    use std::io::Write;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
