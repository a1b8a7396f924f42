//! Core types for the Cubeform deformation engine.
//!
//! This crate contains the leaf value types every other Cubeform crate
//! builds on: lattice [`Coordinate`]s, spatial [`Point`]s and their
//! [`Vector3`] differences, the [`Axis`]/[`MutationAxis`] tags that drive
//! nudging and propagation, strongly-typed identifiers, and the
//! [`LatticeError`] type.
//!
//! # Grid vs. space
//!
//! A [`Coordinate`] indexes the 3×3×3 grid; a [`Point`] lives in
//! `[-1, 1]³`. The two frames are not aligned: the first grid index
//! follows spatial Z and the last follows spatial X. The mapping is
//! owned by [`Axis::grid_dimension`] and nothing else.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod coordinate;
pub mod error;
pub mod id;
pub mod point;

pub use axis::{Axis, Direction, MutationAxis};
pub use coordinate::Coordinate;
pub use error::LatticeError;
pub use id::{DeltaId, LatticeId, MaterialId};
pub use point::{Point, Vector3};

/// Number of lattice positions along each grid dimension.
pub const GRID_SIZE: usize = 3;

/// Total number of positions in a lattice.
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE * GRID_SIZE;

/// Unit of movement for a single nudge: 2% of the `[-1, 1]` span.
pub const STEP_SIZE: f32 = 0.04;

/// Minimum summed face-to-face spread per axis: 20% of the span.
pub const VOLUME_THRESHOLD: f32 = 0.4;

/// Neighbouring points may not come closer than this many steps.
pub const FOLD_GAP_STEPS: f32 = 10.0;

/// Largest same-plane Z difference a flowable surface may hold.
pub const SLOPE_THRESHOLD: f32 = 0.45;

/// Tolerance used by approximate [`Point`] equality.
pub const POINT_TOLERANCE: f32 = 0.01;
