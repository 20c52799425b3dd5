// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the procedure engine

use ngp_adapters::GatewayError;
use ngp_core::{EntityId, ProcedureId, RegistryError};
use thiserror::Error;

/// Errors returned by the launch API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("procedure id already in use: {0}")]
    DuplicateId(ProcedureId),
    #[error("{kind} already active for {entity}")]
    AlreadyActive { entity: EntityId, kind: &'static str },
}

/// Errors that can occur during effect execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
