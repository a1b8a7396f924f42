//! The Cubeform deformation engine.
//!
//! [`Engine`] ties a [`LatticeGraph`](cubeform_lattice::LatticeGraph), a
//! [`MaterialManager`](cubeform_material::MaterialManager) and a
//! [`GridStore`](cubeform_store::GridStore) together behind one entry
//! point, [`Engine::permute`], and pages grids in and out of the store.
//! [`Explorer`] is a bounded, single-threaded driver that walks the
//! lattice graph breadth-first from the Default lattice.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod explorer;

pub use config::EngineConfig;
pub use engine::{Engine, Permutation};
pub use error::EngineError;
pub use explorer::{ExploreReport, Explorer};
