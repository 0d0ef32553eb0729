//! Handles resolved during a single decode pass.

use crate::handle::ResourceHandle;
use crate::urn::Urn;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared table of handles resolved during one decode pass.
///
/// Every output built by a pass keeps a clone of the pass's table, so
/// dependency URNs can later be turned back into the richest handle seen for
/// them. Cloning is cheap; clones share storage.
#[derive(Clone, Default)]
pub struct HandleTable {
    handles: Arc<RwLock<HashMap<Urn, ResourceHandle>>>,
}

impl core::fmt::Debug for HandleTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandleTable")
            .field("len", &self.len())
            .finish()
    }
}

impl HandleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a handle.
    ///
    /// A typed handle replaces a dependency-only one for the same URN; the
    /// reverse never happens.
    pub fn record(&self, handle: &ResourceHandle) {
        let mut handles = self.handles.write();
        match handles.get(handle.urn()) {
            Some(existing) if !existing.is_dependency_only() => {}
            _ => {
                handles.insert(handle.urn().clone(), handle.clone());
            }
        }
    }

    /// Records every handle of `other`, with the same upgrade rule as
    /// [`record`](Self::record).
    pub fn absorb(&self, other: &HandleTable) {
        if Arc::ptr_eq(&self.handles, &other.handles) {
            return;
        }
        let incoming: Vec<ResourceHandle> = other.handles.read().values().cloned().collect();
        for handle in &incoming {
            self.record(handle);
        }
    }

    /// Returns the recorded handle for `urn`, if any.
    #[must_use]
    pub fn get(&self, urn: &Urn) -> Option<ResourceHandle> {
        self.handles.read().get(urn).cloned()
    }

    /// Returns the recorded handle for `urn`, or a dependency-only handle.
    #[must_use]
    pub fn materialize(&self, urn: &Urn) -> ResourceHandle {
        self.get(urn)
            .unwrap_or_else(|| ResourceHandle::dependency(urn.clone()))
    }

    /// Returns the number of recorded handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }
}
