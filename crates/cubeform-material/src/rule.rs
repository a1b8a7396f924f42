//! The [`MaterialRule`] trait and its result types.

use cubeform_core::{Coordinate, MaterialId};
use cubeform_lattice::{GeometryConfig, Grid};
use indexmap::IndexSet;

/// Outcome of [`MaterialRule::check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The grid satisfies the rule.
    Valid,
    /// The grid violates the rule at these coordinates.
    Violations(IndexSet<Coordinate>),
}

impl Verdict {
    /// Whether the grid satisfied the rule.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Offending coordinates, `None` when valid.
    pub fn violations(&self) -> Option<&IndexSet<Coordinate>> {
        match self {
            Verdict::Valid => None,
            Verdict::Violations(v) => Some(v),
        }
    }
}

/// Outcome of [`MaterialRule::repair`].
#[derive(Clone, Debug, PartialEq)]
pub enum Repair {
    /// A grid that satisfies the rule.
    Corrected(Grid),
    /// No repair is possible; the lattice must be replaced by the
    /// Invalid sentinel.
    Condemned,
}

/// A physical-plausibility constraint with check and repair behaviour.
///
/// # Contract
///
/// - `check` and `repair` are pure functions of their arguments.
/// - `repair` only returns [`Repair::Corrected`] for a grid that passes
///   `check` and keeps the volume invariant of `geometry`.
/// - `id` is unique among the rules of one [`MaterialManager`](crate::MaterialManager).
///
/// # Object safety
///
/// This trait is object-safe; the manager stores rules as
/// `Vec<Box<dyn MaterialRule>>`.
pub trait MaterialRule: Send + Sync + 'static {
    /// Identifier recorded on lattices that pass this rule.
    fn id(&self) -> MaterialId;

    /// Human-readable rule name for logs.
    fn name(&self) -> &str;

    /// Real-world materials this rule stands for.
    fn friendly_names(&self) -> &[&'static str];

    /// Find every coordinate that violates the rule.
    fn check(&self, grid: &Grid) -> Verdict;

    /// Try to correct `grid` so that it passes [`check`](Self::check).
    fn repair(
        &self,
        grid: &Grid,
        violations: &IndexSet<Coordinate>,
        geometry: &GeometryConfig,
    ) -> Repair;
}
