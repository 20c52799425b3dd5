// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! NG procedure daemon (ngpd)
//!
//! Connects a simulated gNB to a scripted AMF over in-process channels and
//! drives the procedure engine from a paced tick source.

pub mod config;
pub mod lifecycle;
pub mod peer;

pub use config::{AmfConfig, Config, NodeConfig};
pub use lifecycle::{write_startup_marker, Daemon, LifecycleError, Report};
pub use peer::{PeerScript, SimulatedAmf};
