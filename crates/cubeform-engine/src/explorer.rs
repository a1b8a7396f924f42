//! Breadth-first exploration driver.
//!
//! The explorer pops a lattice from a FIFO queue, permutes it at every
//! coordinate, and queues the valid children it has not seen before.
//! With [`EngineConfig::page_children`](crate::EngineConfig::page_children)
//! set, each child is paged out as soon as it is produced and paged back
//! in when its turn comes.

use std::collections::VecDeque;

use cubeform_core::{Coordinate, LatticeId};
use cubeform_lattice::ExpansionStats;
use cubeform_store::GridStore;
use indexmap::IndexSet;
use tracing::info;

use crate::engine::Engine;
use crate::error::EngineError;

/// Totals from one [`Explorer::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExploreReport {
    /// Lattices permuted at every coordinate.
    pub expanded: usize,
    /// Distinct valid children queued.
    pub produced: usize,
    /// Children the material rules condemned.
    pub condemned: usize,
    /// Lattices still waiting in the queue when the run stopped.
    pub remaining: usize,
    /// Candidate bookkeeping summed over every permutation.
    pub stats: ExpansionStats,
}

/// A bounded FIFO walk of the lattice graph.
#[derive(Clone, Debug)]
pub struct Explorer {
    queue: VecDeque<LatticeId>,
    seen: IndexSet<LatticeId>,
    report: ExploreReport,
}

impl Explorer {
    /// Start a walk from `seed`.
    pub fn new(seed: LatticeId) -> Self {
        let mut seen = IndexSet::new();
        seen.insert(seed);
        Self {
            queue: VecDeque::from([seed]),
            seen,
            report: ExploreReport::default(),
        }
    }

    /// Start a walk from the engine's Default lattice.
    pub fn from_default<S: GridStore>(engine: &Engine<S>) -> Self {
        Self::new(engine.default_id())
    }

    /// Lattices waiting to be expanded, in order.
    pub fn queue(&self) -> impl Iterator<Item = LatticeId> + '_ {
        self.queue.iter().copied()
    }

    /// Every lattice that has been queued so far, seed included.
    pub fn seen(&self) -> &IndexSet<LatticeId> {
        &self.seen
    }

    /// Totals accumulated so far.
    pub fn report(&self) -> &ExploreReport {
        &self.report
    }

    /// Expand the next queued lattice at all 27 coordinates.
    ///
    /// Returns the expanded id, or `None` if the queue is empty.
    ///
    /// # Errors
    ///
    /// Propagates engine errors. The failing lattice is put back at the
    /// front of the queue. Children found before the failure stay queued,
    /// possibly still resident.
    pub fn step<S: GridStore>(
        &mut self,
        engine: &mut Engine<S>,
    ) -> Result<Option<LatticeId>, EngineError> {
        let Some(id) = self.queue.pop_front() else {
            return Ok(None);
        };
        if let Err(e) = self.expand_all(engine, id) {
            self.queue.push_front(id);
            return Err(e);
        }
        self.report.expanded += 1;
        self.report.remaining = self.queue.len();
        Ok(Some(id))
    }

    fn expand_all<S: GridStore>(
        &mut self,
        engine: &mut Engine<S>,
        id: LatticeId,
    ) -> Result<(), EngineError> {
        let page = engine.config().page_children;
        for coordinate in Coordinate::all() {
            let out = engine.permute(id, coordinate)?;
            self.report.stats.merge(&out.stats);
            self.report.condemned += out.condemned;
            let fresh: Vec<LatticeId> = out
                .children
                .into_iter()
                .filter(|&child| self.seen.insert(child))
                .collect();
            self.report.produced += fresh.len();
            self.queue.extend(fresh.iter().copied());
            if page {
                for child in fresh {
                    engine.page_out(child)?;
                }
            }
        }
        if page {
            engine.page_out(id)?;
        }
        Ok(())
    }

    /// Step until the queue drains or the engine's expansion budget is
    /// spent.
    pub fn run<S: GridStore>(
        &mut self,
        engine: &mut Engine<S>,
    ) -> Result<ExploreReport, EngineError> {
        let budget = engine.config().max_expansions;
        let mut expanded = 0usize;
        while budget.map_or(true, |max| expanded < max) {
            match self.step(engine)? {
                Some(id) => {
                    expanded += 1;
                    if expanded % 16 == 0 {
                        info!(
                            last = %id,
                            expanded = self.report.expanded,
                            queued = self.queue.len(),
                            lattices = engine.graph().len(),
                            "exploration progress"
                        );
                    }
                }
                None => break,
            }
        }
        self.report.remaining = self.queue.len();
        info!(
            expanded = self.report.expanded,
            produced = self.report.produced,
            condemned = self.report.condemned,
            remaining = self.report.remaining,
            "exploration stopped"
        );
        Ok(self.report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use cubeform_store::MemoryStore;

    fn engine(max_expansions: Option<usize>) -> Engine<MemoryStore> {
        let config = EngineConfig {
            max_expansions,
            ..EngineConfig::default()
        };
        Engine::new(config, MemoryStore::new()).unwrap()
    }

    #[test]
    fn single_expansion_queues_distinct_children() {
        let mut engine = engine(Some(1));
        let mut explorer = Explorer::from_default(&engine);
        let report = explorer.run(&mut engine).unwrap();
        assert_eq!(report.expanded, 1);
        assert!(report.produced > 0);
        assert_eq!(report.remaining, report.produced);
        assert_eq!(explorer.seen().len(), report.produced + 1);
    }

    #[test]
    fn children_are_paged_out_when_queued() {
        let mut engine = engine(Some(1));
        let mut explorer = Explorer::from_default(&engine);
        explorer.run(&mut engine).unwrap();
        for id in explorer.queue() {
            assert!(engine.graph().is_paged(id));
            assert!(engine.store().contains(id));
        }
        assert!(engine.graph().is_paged(engine.default_id()));
    }

    #[test]
    fn resident_children_when_paging_disabled() {
        let config = EngineConfig {
            max_expansions: Some(1),
            page_children: false,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config, MemoryStore::new()).unwrap();
        let mut explorer = Explorer::from_default(&engine);
        explorer.run(&mut engine).unwrap();
        assert!(engine.store().is_empty());
        assert!(explorer.queue().all(|id| !engine.graph().is_paged(id)));
    }

    #[test]
    fn budget_bounds_the_run() {
        let mut engine = engine(Some(3));
        let mut explorer = Explorer::from_default(&engine);
        let report = explorer.run(&mut engine).unwrap();
        assert_eq!(report.expanded, 3);
        // A second run continues from where the first stopped.
        let again = explorer.run(&mut engine).unwrap();
        assert_eq!(again.expanded, 6);
    }

    #[test]
    fn empty_queue_stops_immediately() {
        let mut engine = engine(None);
        let mut explorer = Explorer::new(engine.graph().invalid_id());
        explorer.queue.clear();
        let report = explorer.run(&mut engine).unwrap();
        assert_eq!(report, ExploreReport::default());
    }

    #[test]
    fn failed_step_requeues_lattice() {
        let mut engine = engine(None);
        let invalid = engine.graph().invalid_id();
        let mut explorer = Explorer::new(invalid);
        assert!(explorer.step(&mut engine).is_err());
        assert_eq!(explorer.queue().next(), Some(invalid));
        assert_eq!(explorer.report().expanded, 0);
    }
}
