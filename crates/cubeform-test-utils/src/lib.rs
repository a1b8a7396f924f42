//! Test fixtures and mock stores for Cubeform development.
//!
//! Provides hand-built grids that trip each material rule
//! ([`fixtures`]), a rule that condemns everything ([`CondemnAll`]),
//! and a grid store with injected failures ([`FailingStore`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod store;

use cubeform_core::{Coordinate, MaterialId};
use cubeform_lattice::{GeometryConfig, Grid};
use cubeform_material::{MaterialRule, Repair, Verdict};
use indexmap::IndexSet;

pub use store::{FailingStore, FailurePoint};

/// A rule that rejects every grid and never repairs.
///
/// Useful for checking that condemned lattices are linked to the
/// Invalid sentinel and dropped from permutation results.
pub struct CondemnAll;

impl CondemnAll {
    pub const ID: MaterialId = MaterialId(99);
}

impl MaterialRule for CondemnAll {
    fn id(&self) -> MaterialId {
        Self::ID
    }

    fn name(&self) -> &str {
        "condemn-all"
    }

    fn friendly_names(&self) -> &[&'static str] {
        &[]
    }

    fn check(&self, _grid: &Grid) -> Verdict {
        Verdict::Violations(Coordinate::all().collect())
    }

    fn repair(
        &self,
        _grid: &Grid,
        _violations: &IndexSet<Coordinate>,
        _geometry: &GeometryConfig,
    ) -> Repair {
        Repair::Condemned
    }
}
