//! In-memory grid store.

use crate::codec::{grid_from_bytes, grid_to_bytes};
use crate::error::StoreError;
use crate::store::GridStore;
use cubeform_core::LatticeId;
use cubeform_lattice::Grid;
use indexmap::IndexMap;

/// Encoded grids held in a map.
///
/// Grids go through the binary codec so that a memory-backed run
/// exercises the same encode/decode path as a file-backed one.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: IndexMap<LatticeId, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored grids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no grids are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw encoded bytes stored under `id`.
    pub fn bytes(&self, id: LatticeId) -> Option<&[u8]> {
        self.entries.get(&id).map(|b| b.as_slice())
    }
}

impl GridStore for MemoryStore {
    fn save(&mut self, id: LatticeId, grid: &Grid) -> Result<(), StoreError> {
        if !self.entries.contains_key(&id) {
            let bytes = grid_to_bytes(grid)?;
            self.entries.insert(id, bytes);
        }
        Ok(())
    }

    fn load(&self, id: LatticeId) -> Result<Grid, StoreError> {
        let bytes = self.entries.get(&id).ok_or(StoreError::NotFound { id })?;
        grid_from_bytes(bytes)
    }

    fn contains(&self, id: LatticeId) -> bool {
        self.entries.contains_key(&id)
    }
}
