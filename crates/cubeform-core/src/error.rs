//! Error types for lattice access and mutation.

use crate::coordinate::Coordinate;
use crate::id::LatticeId;
use std::error::Error;
use std::fmt;

/// Errors arising from lattice lookups and mutation requests.
///
/// Geometric rejections (fold guard, volume collapse, duplicate deltas)
/// are not errors: they drop candidates or substitute a sentinel lattice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// A coordinate outside `[0, 2]` was passed where a lattice position
    /// is required. This is a caller bug; no partial result is produced.
    CoordinateOutOfRange {
        /// The offending coordinate.
        coordinate: Coordinate,
    },
    /// No lattice with this id exists in the graph.
    UnknownLattice {
        /// The missing id.
        id: LatticeId,
    },
    /// The lattice's grid has been paged out and must be loaded first.
    GridUnavailable {
        /// The paged lattice.
        id: LatticeId,
    },
    /// The lattice is a sentinel and has no geometry.
    SentinelGrid {
        /// The sentinel's id.
        id: LatticeId,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfRange { coordinate } => {
                write!(f, "coordinate {coordinate} outside the [0, 2] lattice range")
            }
            Self::UnknownLattice { id } => write!(f, "unknown lattice {id}"),
            Self::GridUnavailable { id } => {
                write!(f, "grid of lattice {id} is paged out")
            }
            Self::SentinelGrid { id } => {
                write!(f, "lattice {id} is a sentinel and has no grid")
            }
        }
    }
}

impl Error for LatticeError {}
