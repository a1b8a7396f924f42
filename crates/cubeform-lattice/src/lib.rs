//! Lattice storage and the deformation engine for Cubeform.
//!
//! A [`Lattice`] is a 3×3×3 [`Grid`] of points plus its identity, the
//! [`Delta`] edges it takes part in, and the materials already proven
//! valid for it. Lattices live in a [`LatticeGraph`], which owns the
//! identity counter and the three well-known lattices (Default, Invalid,
//! OutOfBounds) so that tests can build a fresh graph per run.
//!
//! # Mutation
//!
//! [`expand`] nudges one coordinate's point by a single step in every
//! eligible direction, co-mutates the neighbour in the direction of
//! motion, and records each surviving transition as a [`Delta`]. Material
//! rules run on top of this in `cubeform-material`.
//!
//! # Invariants
//!
//! - Every non-sentinel lattice's grid satisfies [`Grid::is_volumetric`].
//! - Published grids are never mutated; changes always produce a new
//!   lattice (or the Invalid sentinel).
//! - Delta edges are append-only and deduplicated by origin and change set.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod delta;
pub mod graph;
pub mod grid;
pub mod hash;
pub mod lattice;
pub mod mutation;

pub use config::{ConfigError, DedupPolicy, GeometryConfig};
pub use delta::{Change, Delta, DeltaKey};
pub use graph::LatticeGraph;
pub use grid::{ContentKey, Grid};
pub use hash::grid_hash;
pub use lattice::{Lattice, LatticeKind, INVALID_TAG, OUT_OF_BOUNDS_TAG};
pub use mutation::{expand, Candidate, Expansion, ExpansionStats};
