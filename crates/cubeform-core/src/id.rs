//! Strongly-typed identifiers.

use std::fmt;

/// Identity of a lattice within a lattice graph.
///
/// Allocated from a monotonic counter owned by the graph, so two lattices
/// in the same graph never share an id, even when their grids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeId(pub u64);

impl fmt::Display for LatticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LatticeId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Position of a delta edge in its graph's append-only edge list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeltaId(pub u32);

impl fmt::Display for DeltaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DeltaId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a material rule.
///
/// Rules are declared statically; each returns a fixed id that lattices
/// record once the rule has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MaterialId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
