// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! NG control-plane procedure engine

mod engine;
mod error;
mod executor;
mod handle;
mod task;

pub use engine::{CommonTransactions, Engine, NoCommonTransactions};
pub use error::{EngineError, ExecuteError};
pub use handle::ProcedureHandle;
