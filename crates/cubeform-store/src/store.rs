//! The [`GridStore`] boundary trait.

use crate::error::StoreError;
use cubeform_core::LatticeId;
use cubeform_lattice::Grid;

/// Persistent storage for lattice grids, keyed by lattice id.
///
/// # Contract
///
/// - `save` is idempotent: saving an id that is already stored succeeds
///   without rewriting it.
/// - `load(id)` after a successful `save(id, grid)` returns a grid equal
///   to `grid` within point tolerance.
/// - `load` of an id never saved fails with [`StoreError::NotFound`].
///
/// Stores never retry internally; failures are surfaced to the caller.
pub trait GridStore {
    /// Persist `grid` under `id`.
    fn save(&mut self, id: LatticeId, grid: &Grid) -> Result<(), StoreError>;

    /// Read back the grid stored under `id`.
    fn load(&self, id: LatticeId) -> Result<Grid, StoreError>;

    /// Whether a grid is stored under `id`.
    fn contains(&self, id: LatticeId) -> bool;
}

impl<S: GridStore + ?Sized> GridStore for Box<S> {
    fn save(&mut self, id: LatticeId, grid: &Grid) -> Result<(), StoreError> {
        (**self).save(id, grid)
    }

    fn load(&self, id: LatticeId) -> Result<Grid, StoreError> {
        (**self).load(id)
    }

    fn contains(&self, id: LatticeId) -> bool {
        (**self).contains(id)
    }
}
