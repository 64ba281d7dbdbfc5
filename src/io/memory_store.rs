//! In-process snapshot storage for tests and benchmarks

use crate::core::traits::SnapshotStore;
use crate::types::{LedgerError, Snapshot};

/// Snapshot store that keeps the last saved snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    initial: Snapshot,
    saved: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    /// Create a store whose `load` returns `initial` until something is saved
    pub fn new(initial: Snapshot) -> Self {
        MemoryStore {
            initial,
            saved: None,
            saves: 0,
        }
    }

    /// The most recently saved snapshot, if any
    pub fn saved(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Snapshot, LedgerError> {
        Ok(self.saved.clone().unwrap_or_else(|| self.initial.clone()))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), LedgerError> {
        self.saved = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}
