//! Granular material: bounded same-plane slope, relaxed by repair.

use crate::rule::{MaterialRule, Repair, Verdict};
use cubeform_core::{Axis, Coordinate, MaterialId, Vector3, GRID_SIZE, SLOPE_THRESHOLD};
use cubeform_lattice::{Change, ConfigError, GeometryConfig, Grid};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Shifts smaller than this are dropped from a repair pass.
const SHIFT_EPSILON: f32 = 1e-6;

// ── FlowableConfig ─────────────────────────────────────────────────

/// Parameters of the [`Flowable`] rule.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowableConfig {
    /// Largest allowed Z difference between same-plane neighbours.
    /// Default: 0.45.
    pub slope_threshold: f32,
    /// Number of upper grid slices (along spatial Z) that are checked.
    /// Default: 2.
    pub planes: usize,
    /// Maximum relaxation passes before the lattice is condemned.
    /// Default: 10.
    pub max_passes: usize,
}

impl Default for FlowableConfig {
    fn default() -> Self {
        Self {
            slope_threshold: SLOPE_THRESHOLD,
            planes: 2,
            max_passes: 10,
        }
    }
}

impl FlowableConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.slope_threshold.is_finite() || self.slope_threshold <= 0.0 {
            return Err(ConfigError::InvalidSlopeThreshold {
                value: self.slope_threshold,
            });
        }
        if self.planes == 0 || self.planes > GRID_SIZE {
            return Err(ConfigError::InvalidPlaneCount { value: self.planes });
        }
        if self.max_passes == 0 {
            return Err(ConfigError::ZeroRepairPasses);
        }
        Ok(())
    }
}

// ── Flowable ───────────────────────────────────────────────────────

/// Dirt and sand: loose material that settles to an angle of repose.
///
/// In each checked slice, every point is compared with its eight
/// same-plane neighbours. A Z difference above the slope threshold is a
/// violation. Repair pairs each offending point with its steepest
/// neighbour and moves the two toward each other, halving their gap per
/// pass. A pass that fails to reduce the steepest slope, collapses the
/// volume, or exhausts the pass budget condemns the lattice.
#[derive(Clone, Debug, Default)]
pub struct Flowable {
    config: FlowableConfig,
}

impl Flowable {
    /// Material id assigned to the flowable rule.
    pub const ID: MaterialId = MaterialId(1);

    /// Create a rule after validating `config`.
    pub fn new(config: FlowableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The rule's configuration.
    pub fn config(&self) -> &FlowableConfig {
        &self.config
    }

    fn in_scope(&self, c: Coordinate) -> bool {
        let first = (GRID_SIZE - self.config.planes) as i32;
        c.is_in_bounds() && c.index_along(Axis::Z) >= first
    }

    fn scoped(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(move |&c| self.in_scope(c))
    }

    /// Largest Z difference between any two same-plane neighbours in the
    /// checked slices.
    pub fn max_slope(&self, grid: &Grid) -> f32 {
        self.scoped()
            .flat_map(|c| {
                let z = grid[c].z;
                c.plane_neighbours()
                    .into_iter()
                    .map(move |n| (grid[n].z - z).abs())
            })
            .fold(0.0, f32::max)
    }

    /// One relaxation pass over `violations`.
    ///
    /// Each offending coordinate is paired with its steepest same-plane
    /// neighbour. Every distinct pair closes half its gap, the higher
    /// point moving down and the lower point up by a quarter each. A
    /// point in several pairs takes the mean of its shifts. Returns
    /// `None` when no point would move.
    pub fn repair_pass(&self, grid: &Grid, violations: &IndexSet<Coordinate>) -> Option<Grid> {
        let mut pairs = IndexSet::new();
        for &c in violations {
            if !self.in_scope(c) {
                continue;
            }
            let z = grid[c].z;
            let steepest = c.plane_neighbours().into_iter().max_by(|a, b| {
                (grid[*a].z - z).abs().total_cmp(&(grid[*b].z - z).abs())
            });
            if let Some(n) = steepest {
                pairs.insert((c.min(n), c.max(n)));
            }
        }

        let mut shifts: IndexMap<Coordinate, (f32, u32)> = IndexMap::new();
        for (a, b) in pairs {
            let split = (grid[a].z - grid[b].z) / 2.0;
            for (c, shift) in [(a, -split / 2.0), (b, split / 2.0)] {
                let entry = shifts.entry(c).or_insert((0.0, 0));
                entry.0 += shift;
                entry.1 += 1;
            }
        }

        let changes: Vec<Change> = shifts
            .into_iter()
            .map(|(c, (sum, n))| Change::new(c, Vector3::along(Axis::Z, sum / n as f32)))
            .filter(|change| change.vector.z.abs() >= SHIFT_EPSILON)
            .collect();
        if changes.is_empty() {
            return None;
        }
        grid.apply(&changes).ok()
    }
}

impl MaterialRule for Flowable {
    fn id(&self) -> MaterialId {
        Self::ID
    }

    fn name(&self) -> &str {
        "flowable"
    }

    fn friendly_names(&self) -> &[&'static str] {
        &["dirt", "sand"]
    }

    fn check(&self, grid: &Grid) -> Verdict {
        let mut violations = IndexSet::new();
        for c in self.scoped() {
            let z = grid[c].z;
            for n in c.plane_neighbours() {
                if (grid[n].z - z).abs() > self.config.slope_threshold {
                    violations.insert(c);
                    violations.insert(n);
                }
            }
        }
        if violations.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Violations(violations)
        }
    }

    fn repair(
        &self,
        grid: &Grid,
        violations: &IndexSet<Coordinate>,
        geometry: &GeometryConfig,
    ) -> Repair {
        let mut current = grid.clone();
        let mut violations = violations.clone();
        let mut slope = self.max_slope(&current);

        for pass in 1..=self.config.max_passes {
            let Some(next) = self.repair_pass(&current, &violations) else {
                warn!(pass, "flowable repair made no progress");
                return Repair::Condemned;
            };
            if !next.is_volumetric(geometry.volume_threshold) {
                warn!(pass, "flowable repair collapsed the lattice");
                return Repair::Condemned;
            }
            let next_slope = self.max_slope(&next);
            if next_slope >= slope {
                warn!(pass, slope, next_slope, "flowable repair did not reduce slope");
                return Repair::Condemned;
            }
            debug!(pass, slope = next_slope, "flowable repair pass");
            match self.check(&next) {
                Verdict::Valid => return Repair::Corrected(next),
                Verdict::Violations(v) => {
                    current = next;
                    violations = v;
                    slope = next_slope;
                }
            }
        }

        warn!(
            max_passes = self.config.max_passes,
            slope, "flowable repair budget exhausted"
        );
        Repair::Condemned
    }
}
