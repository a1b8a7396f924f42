//! [`MaterialManager`]: applies the registered rules to a lattice.

use crate::flowable::{Flowable, FlowableConfig};
use crate::rule::{MaterialRule, Repair, Verdict};
use crate::solid::Solid;
use cubeform_core::{LatticeError, LatticeId};
use cubeform_lattice::{ConfigError, LatticeGraph};
use tracing::{debug, warn};

/// An ordered, fixed list of material rules.
///
/// Rules run in registration order. A rule already recorded as passed on
/// a lattice is skipped, so processing the same lattice twice records
/// nothing new.
pub struct MaterialManager {
    rules: Vec<Box<dyn MaterialRule>>,
}

impl MaterialManager {
    /// The standard rule set: [`Solid`] then [`Flowable`].
    pub fn new(flowable: FlowableConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_rules(vec![
            Box::new(Solid),
            Box::new(Flowable::new(flowable)?),
        ]))
    }

    /// A manager over an explicit rule list.
    pub fn with_rules(rules: Vec<Box<dyn MaterialRule>>) -> Self {
        Self { rules }
    }

    /// A manager with no rules; [`process`](Self::process) is the identity.
    pub fn empty() -> Self {
        Self::with_rules(Vec::new())
    }

    /// Registered rules in order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn MaterialRule> + '_ {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over lattice `id` and return the lattice that
    /// should replace it.
    ///
    /// - A passing rule is recorded on the lattice.
    /// - A repaired grid is published as a new lattice, linked from the
    ///   current one by the coordinate-wise difference, marked as passing
    ///   the repairing rule, and then processed from the first rule.
    /// - A condemned lattice is linked to the Invalid sentinel by an
    ///   empty delta and the sentinel is returned.
    /// - Sentinels are returned unchanged.
    ///
    /// Re-deriving a repair that is already recorded follows the existing
    /// edge instead of publishing a second lattice.
    ///
    /// # Errors
    ///
    /// Lookup errors if `id` is unknown or its grid is paged out.
    pub fn process(&self, graph: &mut LatticeGraph, id: LatticeId) -> Result<LatticeId, LatticeError> {
        let invalid = graph.invalid_id();
        let mut current = id;

        'lattice: loop {
            if graph.lattice(current)?.is_sentinel() {
                return Ok(current);
            }

            for rule in &self.rules {
                if graph.has_passed(current, rule.id()) {
                    continue;
                }
                let grid = graph.grid(current)?;
                let violations = match rule.check(grid) {
                    Verdict::Valid => {
                        graph.mark_material(current, rule.id())?;
                        continue;
                    }
                    Verdict::Violations(v) => v,
                };

                let fixed = match rule.repair(grid, &violations, graph.config()) {
                    Repair::Corrected(fixed) => fixed,
                    Repair::Condemned => {
                        warn!(lattice = %current, rule = rule.name(), "lattice condemned");
                        graph.link(current, &[], invalid)?;
                        return Ok(invalid);
                    }
                };

                let changes = grid.diff(&fixed);
                if changes.is_empty() {
                    continue;
                }
                if let Some(existing) = graph.find_delta(current, &changes) {
                    if let Some(delta) = graph.delta(existing) {
                        current = delta.result();
                        continue 'lattice;
                    }
                }

                let repaired = graph.insert(fixed);
                graph.link(current, &changes, repaired)?;
                if repaired == invalid {
                    warn!(lattice = %current, rule = rule.name(), "repair collapsed lattice");
                    return Ok(invalid);
                }
                graph.mark_material(repaired, rule.id())?;
                debug!(
                    from = %current,
                    to = %repaired,
                    rule = rule.name(),
                    changes = changes.len(),
                    "material repair applied"
                );
                current = repaired;
                continue 'lattice;
            }

            return Ok(current);
        }
    }
}

impl std::fmt::Debug for MaterialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeform_core::{Coordinate, MaterialId, Point};
    use cubeform_lattice::{GeometryConfig, Grid};

    fn setup() -> (LatticeGraph, MaterialManager) {
        (
            LatticeGraph::new(GeometryConfig::default()).unwrap(),
            MaterialManager::new(FlowableConfig::default()).unwrap(),
        )
    }

    #[test]
    fn default_lattice_passes_everything() {
        let (mut graph, manager) = setup();
        let id = graph.default_id();
        assert_eq!(manager.process(&mut graph, id).unwrap(), id);
        assert!(graph.has_passed(id, MaterialId(0)));
        assert!(graph.has_passed(id, MaterialId(1)));
        assert_eq!(graph.delta_count(), 0);
    }

    #[test]
    fn sentinels_pass_through() {
        let (mut graph, manager) = setup();
        let invalid = graph.invalid_id();
        assert_eq!(manager.process(&mut graph, invalid).unwrap(), invalid);
        assert!(graph.lattice(invalid).unwrap().materials().is_empty());
    }

    #[test]
    fn folded_lattice_is_condemned_with_empty_edge() {
        let (mut graph, manager) = setup();
        let mut g = Grid::unit_cube();
        // The middle slice dips below the bottom slice along Z.
        g[Coordinate::new(0, 0, 0)] = Point::new(-1.0, -1.0, -0.5);
        g[Coordinate::new(1, 0, 0)] = Point::new(-1.0, -1.0, -0.6);
        let id = graph.insert(g);
        assert_eq!(manager.process(&mut graph, id).unwrap(), graph.invalid_id());
        let out = graph.outgoing(id);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_empty());
        assert_eq!(out[0].result(), graph.invalid_id());
    }

    #[test]
    fn steep_lattice_is_replaced_by_repaired_child() {
        let (mut graph, manager) = setup();
        let mut g = Grid::unit_cube();
        g[Coordinate::new(1, 0, 0)] = Point::new(-1.0, -1.0, 0.46);
        g[Coordinate::new(1, 0, 1)] = Point::new(0.0, -1.0, 0.2);
        g[Coordinate::new(1, 1, 1)] = Point::new(0.0, 0.0, 0.2);
        let id = graph.insert(g);
        let repaired = manager.process(&mut graph, id).unwrap();
        assert_ne!(repaired, id);
        assert!(graph.is_valid(repaired));
        assert!(graph.has_passed(repaired, Flowable::ID));
        assert!(graph.has_passed(repaired, Solid::ID));
        assert!(!graph.has_passed(id, Flowable::ID));
        let out = graph.outgoing(id);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].result(), repaired);
        assert_eq!(out[0].changes().len(), 2);
    }

    #[test]
    fn processing_twice_adds_no_edges() {
        let (mut graph, manager) = setup();
        let mut g = Grid::unit_cube();
        g[Coordinate::new(1, 0, 0)] = Point::new(-1.0, -1.0, 0.46);
        let id = graph.insert(g);
        let first = manager.process(&mut graph, id).unwrap();
        let deltas = graph.delta_count();
        let lattices = graph.len();
        let second = manager.process(&mut graph, id).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.delta_count(), deltas);
        assert_eq!(graph.len(), lattices);
    }

    #[test]
    fn empty_manager_is_identity() {
        let mut graph = LatticeGraph::new(GeometryConfig::default()).unwrap();
        let id = graph.default_id();
        let manager = MaterialManager::empty();
        assert!(manager.is_empty());
        assert_eq!(manager.process(&mut graph, id).unwrap(), id);
        assert!(graph.lattice(id).unwrap().materials().is_empty());
    }

    #[test]
    fn debug_lists_rule_names() {
        let manager = MaterialManager::new(FlowableConfig::default()).unwrap();
        assert_eq!(format!("{manager:?}"), r#"["solid", "flowable"]"#);
        assert_eq!(manager.len(), 2);
    }
}
