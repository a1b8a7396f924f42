//! Rigid material: no folding on any axis, no repair.

use crate::rule::{MaterialRule, Repair, Verdict};
use cubeform_core::{Axis, Coordinate, MaterialId};
use cubeform_lattice::{GeometryConfig, Grid};
use indexmap::IndexSet;

/// Stone and rock.
///
/// Along every spatial axis, each point's component for that axis must
/// not be smaller than the component of its predecessor on the grid
/// dimension tracking that axis. A later slice lying spatially behind an
/// earlier one means the lattice folded through itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solid;

impl Solid {
    /// Material id assigned to the solid rule.
    pub const ID: MaterialId = MaterialId(0);
}

impl MaterialRule for Solid {
    fn id(&self) -> MaterialId {
        Self::ID
    }

    fn name(&self) -> &str {
        "solid"
    }

    fn friendly_names(&self) -> &[&'static str] {
        &["stone", "rock"]
    }

    fn check(&self, grid: &Grid) -> Verdict {
        let mut violations = IndexSet::new();
        for (c, point) in grid.iter() {
            for axis in Axis::ALL {
                let prior = c.prior(axis);
                if prior.is_out_of_bounds() {
                    continue;
                }
                if grid[prior].get(axis) > point.get(axis) {
                    violations.insert(prior);
                    violations.insert(c);
                }
            }
        }
        if violations.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Violations(violations)
        }
    }

    fn repair(&self, _: &Grid, _: &IndexSet<Coordinate>, _: &GeometryConfig) -> Repair {
        Repair::Condemned
    }
}
