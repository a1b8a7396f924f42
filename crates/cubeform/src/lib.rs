//! Cubeform: a deformation engine for 3×3×3 voxel cube lattices.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cubeform sub-crates. For most users, adding `cubeform` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cubeform::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default(), MemoryStore::new()).unwrap();
//! let root = engine.default_id();
//!
//! // Nudge the bottom corner and keep only children every material accepts.
//! let out = engine.permute(root, Coordinate::new(0, 0, 0)).unwrap();
//! assert_eq!(out.children.len(), 6);
//! for child in &out.children {
//!     assert!(engine.graph().is_valid(*child));
//! }
//!
//! // Walk outward breadth-first, one lattice per step.
//! let mut explorer = Explorer::from_default(&engine);
//! explorer.step(&mut engine).unwrap();
//! assert_eq!(explorer.report().expanded, 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cubeform-core` | Axes, coordinates, points, ids, lattice errors |
//! | [`lattice`] | `cubeform-lattice` | Grids, deltas, the lattice graph, expansion |
//! | [`material`] | `cubeform-material` | Material rules and the manager that applies them |
//! | [`store`] | `cubeform-store` | Grid codec and paging stores |
//! | [`engine`] | `cubeform-engine` | The permute entry point and the explorer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Axes, coordinates, points, and ids (`cubeform-core`).
pub use cubeform_core as types;

/// Grids, deltas, and the lattice graph (`cubeform-lattice`).
///
/// [`lattice::expand`] is the mutation step; [`lattice::LatticeGraph`]
/// owns every lattice and delta.
pub use cubeform_lattice as lattice;

/// Material rules (`cubeform-material`).
///
/// Implement [`material::MaterialRule`] to add a rule and hand it to
/// [`material::MaterialManager::with_rules`].
pub use cubeform_material as material;

/// Grid serialization and stores (`cubeform-store`).
pub use cubeform_store as store;

/// Engine and exploration driver (`cubeform-engine`).
pub use cubeform_engine as engine;

/// Common imports for typical Cubeform usage.
///
/// ```rust
/// use cubeform::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cubeform_core::{
        Axis, Coordinate, Direction, LatticeError, LatticeId, MaterialId, MutationAxis, Point,
        Vector3,
    };

    // Lattice graph
    pub use cubeform_lattice::{
        expand, Change, DedupPolicy, Delta, GeometryConfig, Grid, Lattice, LatticeGraph,
    };

    // Materials
    pub use cubeform_material::{
        Flowable, FlowableConfig, MaterialManager, MaterialRule, Repair, Solid, Verdict,
    };

    // Stores
    pub use cubeform_store::{FileStore, GridStore, MemoryStore, StoreError};

    // Engine
    pub use cubeform_engine::{Engine, EngineConfig, EngineError, ExploreReport, Explorer};
}
