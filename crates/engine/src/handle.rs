// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-side handle to a launched procedure

use ngp_core::{Outcome, ProcedureId};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// Write side of a procedure's result slot, held by the running task
pub(crate) type ResultSlot<T> = Rc<OnceCell<T>>;

/// Handle to a running procedure
///
/// The result is written once by the engine when the procedure settles and
/// can be read any number of times afterwards. Handles are cheap to clone;
/// all clones observe the same slot.
pub struct ProcedureHandle<T> {
    id: ProcedureId,
    slot: ResultSlot<T>,
}

impl<T> ProcedureHandle<T> {
    pub(crate) fn new(id: ProcedureId, slot: ResultSlot<T>) -> Self {
        Self { id, slot }
    }

    pub fn id(&self) -> &ProcedureId {
        &self.id
    }

    /// Whether the procedure has settled (completed or cancelled)
    pub fn ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The settled result.
    ///
    /// # Panics
    ///
    /// Reading before [`ready`](Self::ready) is a contract violation and panics.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn get(&self) -> &T {
        match self.slot.get() {
            Some(result) => result,
            None => panic!("result of procedure {} read before it was ready", self.id),
        }
    }

    pub fn try_get(&self) -> Option<&T> {
        self.slot.get()
    }
}

impl<T, E> ProcedureHandle<Outcome<T, E>> {
    /// Whether the procedure settled by cancellation
    pub fn is_cancelled(&self) -> bool {
        self.slot.get().is_some_and(Outcome::is_cancelled)
    }
}

impl<T> Clone for ProcedureHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ProcedureHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcedureHandle")
            .field("id", &self.id)
            .field("result", &self.slot.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
