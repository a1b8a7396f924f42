//! Delta edges between lattices.

use cubeform_core::{Coordinate, LatticeId, Vector3};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// One coordinate-level change: move the point at `coordinate` by `vector`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Change {
    /// Position that moved.
    pub coordinate: Coordinate,
    /// Signed movement applied to its point.
    pub vector: Vector3,
}

impl Change {
    /// Construct a change.
    pub const fn new(coordinate: Coordinate, vector: Vector3) -> Self {
        Self { coordinate, vector }
    }
}

/// Structural identity of a delta: its origin plus its change set.
///
/// The resulting lattice is deliberately not part of the key. Deriving
/// the same changes from the same origin twice is a duplicate, no matter
/// which lattice the second derivation would have produced. Changes are
/// keyed by coordinate order and quantized vectors so that float drift
/// and listing order do not split otherwise identical transitions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeltaKey {
    origin: LatticeId,
    changes: SmallVec<[(Coordinate, [i32; 3]); 2]>,
}

impl DeltaKey {
    /// Build the key for `changes` applied to `origin`.
    pub fn new(origin: LatticeId, changes: &[Change]) -> Self {
        let mut keyed: SmallVec<[(Coordinate, [i32; 3]); 2]> = changes
            .iter()
            .map(|c| (c.coordinate, c.vector.quantized()))
            .collect();
        keyed.sort_unstable();
        Self {
            origin,
            changes: keyed,
        }
    }

    /// The origin lattice.
    pub fn origin(&self) -> LatticeId {
        self.origin
    }
}

/// A recorded transition from one lattice to another.
///
/// Deltas are append-only edges. Neither endpoint owns the other; both
/// lattices hold the delta's id. An empty change set pointing at the
/// Invalid sentinel marks the origin as condemned by a material rule.
#[derive(Clone, Debug)]
pub struct Delta {
    origin: LatticeId,
    changes: SmallVec<[Change; 2]>,
    result: LatticeId,
}

impl Delta {
    /// Construct a delta.
    pub fn new(origin: LatticeId, changes: &[Change], result: LatticeId) -> Self {
        Self {
            origin,
            changes: SmallVec::from_slice(changes),
            result,
        }
    }

    /// The lattice the changes were applied to.
    pub fn origin(&self) -> LatticeId {
        self.origin
    }

    /// The applied changes, in application order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// The lattice the changes produced.
    pub fn result(&self) -> LatticeId {
        self.result
    }

    /// Whether this delta carries no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Coordinates touched by this delta.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.changes.iter().map(|c| c.coordinate)
    }

    /// Structural key (origin and change set).
    pub fn key(&self) -> DeltaKey {
        DeltaKey::new(self.origin, &self.changes)
    }
}

impl PartialEq for Delta {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Delta {}

impl Hash for Delta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
