//! Grid stores with injected failures.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use cubeform_core::LatticeId;
use cubeform_lattice::Grid;
use cubeform_store::{GridStore, MemoryStore, StoreError};

/// Which store operation a [`FailingStore`] breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    /// Saves fail once `n` saves have succeeded.
    SaveAfter(usize),
    /// Loads fail once `n` loads have succeeded.
    LoadAfter(usize),
    /// Nothing fails.
    Never,
}

/// An in-memory store that fails deterministically.
///
/// Failures surface as [`StoreError::Io`]. Every call is counted,
/// including failed ones.
#[derive(Debug)]
pub struct FailingStore {
    inner: MemoryStore,
    failure: FailurePoint,
    saves: AtomicUsize,
    loads: AtomicUsize,
}

impl FailingStore {
    pub fn new(failure: FailurePoint) -> Self {
        Self {
            inner: MemoryStore::new(),
            failure,
            saves: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    /// Change the failure point; counters keep running.
    pub fn set_failure(&mut self, failure: FailurePoint) {
        self.failure = failure;
    }

    /// Save calls so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    /// Load calls so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn injected(op: &str) -> StoreError {
        StoreError::Io(io::Error::other(format!("injected {op} failure")))
    }
}

impl GridStore for FailingStore {
    fn save(&mut self, id: LatticeId, grid: &Grid) -> Result<(), StoreError> {
        let n = self.saves.fetch_add(1, Ordering::Relaxed);
        if matches!(self.failure, FailurePoint::SaveAfter(limit) if n >= limit) {
            return Err(Self::injected("save"));
        }
        self.inner.save(id, grid)
    }

    fn load(&self, id: LatticeId) -> Result<Grid, StoreError> {
        let n = self.loads.fetch_add(1, Ordering::Relaxed);
        if matches!(self.failure, FailurePoint::LoadAfter(limit) if n >= limit) {
            return Err(Self::injected("load"));
        }
        self.inner.load(id)
    }

    fn contains(&self, id: LatticeId) -> bool {
        self.inner.contains(id)
    }
}
