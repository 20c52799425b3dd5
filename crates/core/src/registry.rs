// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction registry
//!
//! Tracks which procedure instances are outstanding against each remote
//! entity, so a lost transport link can cancel and report exactly those.
//! Entities iterate in a stable (sorted) order.

use crate::id::{EntityId, ProcedureId};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from registry bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("procedure {id} is already registered under {entity}")]
    DuplicateProcedure { entity: EntityId, id: ProcedureId },
}

/// Entity → outstanding procedure instances
#[derive(Debug, Clone, Default)]
pub struct TransactionRegistry {
    entries: BTreeMap<EntityId, BTreeSet<ProcedureId>>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` is outstanding against `entity`
    pub fn register(&mut self, entity: EntityId, id: ProcedureId) -> Result<(), RegistryError> {
        let ids = self.entries.entry(entity.clone()).or_default();
        if !ids.insert(id.clone()) {
            return Err(RegistryError::DuplicateProcedure { entity, id });
        }
        tracing::debug!(%entity, procedure = %id, "registered transaction");
        Ok(())
    }

    /// Drop a single instance; the entity disappears with its last instance.
    /// Returns whether anything was removed.
    pub fn deregister(&mut self, entity: &EntityId, id: &ProcedureId) -> bool {
        let Some(ids) = self.entries.get_mut(entity) else {
            return false;
        };
        let removed = ids.remove(id);
        if ids.is_empty() {
            self.entries.remove(entity);
        }
        if removed {
            tracing::debug!(%entity, procedure = %id, "deregistered transaction");
        }
        removed
    }

    /// Instances outstanding against `entity`, if any
    pub fn find(&self, entity: &EntityId) -> Option<&BTreeSet<ProcedureId>> {
        self.entries.get(entity)
    }

    /// Remove an entity and everything outstanding against it
    pub fn remove(&mut self, entity: &EntityId) -> Option<BTreeSet<ProcedureId>> {
        self.entries.remove(entity)
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entries.contains_key(entity)
    }

    /// Snapshot of the registered entities in registry order
    pub fn entities(&self) -> Vec<EntityId> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total outstanding instances across all entities
    pub fn transaction_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
