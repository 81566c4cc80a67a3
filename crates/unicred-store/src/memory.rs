//! Volatile backend. State is lost when the process exits.

use crate::error::StoreError;
use crate::registry::Registry;
use crate::state::RegistryState;
use crate::traits::RecordSink;
use crate::typed::StoredRecord;

/// Sink that keeps nothing beyond the in-memory state.
#[derive(Debug, Default)]
pub struct Volatile;

impl RecordSink for Volatile {
    fn persist(&mut self, _record: &StoredRecord) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory registry.
pub type MemoryStore = Registry<Volatile>;

impl MemoryStore {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry::from_parts(RegistryState::default(), Volatile)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
