//! The permute entry point and grid paging.

use cubeform_core::{Coordinate, LatticeError, LatticeId};
use cubeform_lattice::{expand, ExpansionStats, LatticeGraph};
use cubeform_material::MaterialManager;
use cubeform_store::GridStore;
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::EngineError;

// ── Permutation ────────────────────────────────────────────────────

/// Outcome of one [`Engine::permute`] call.
#[derive(Clone, Debug, Default)]
pub struct Permutation {
    /// Valid, material-processed children in discovery order, without
    /// repeats.
    pub children: Vec<LatticeId>,
    /// Candidate bookkeeping from the expansion step.
    pub stats: ExpansionStats,
    /// Children the material rules sent to the Invalid sentinel.
    pub condemned: usize,
}

// ── Engine ─────────────────────────────────────────────────────────

/// Owns the lattice graph, the material rules, and the grid store.
///
/// Single-threaded: every mutating call takes `&mut self`, so the
/// graph's lookup and record steps are never interleaved.
pub struct Engine<S: GridStore> {
    graph: LatticeGraph,
    materials: MaterialManager,
    store: S,
    config: EngineConfig,
}

impl<S: GridStore> Engine<S> {
    /// Build an engine with the default material rules.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`] if any part of `config` is rejected.
    pub fn new(config: EngineConfig, store: S) -> Result<Self, EngineError> {
        let materials = MaterialManager::new(config.flowable.clone())?;
        Self::with_materials(config, materials, store)
    }

    /// Build an engine with a caller-supplied rule set.
    pub fn with_materials(
        config: EngineConfig,
        materials: MaterialManager,
        store: S,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let graph = LatticeGraph::new(config.geometry.clone())?;
        Ok(Self {
            graph,
            materials,
            store,
            config,
        })
    }

    /// The lattice graph.
    pub fn graph(&self) -> &LatticeGraph {
        &self.graph
    }

    /// The material rules.
    pub fn materials(&self) -> &MaterialManager {
        &self.materials
    }

    /// The grid store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Id of the Default lattice.
    pub fn default_id(&self) -> LatticeId {
        self.graph.default_id()
    }

    /// Expand `id` at `coordinate` and run every child through the
    /// material rules.
    ///
    /// Returns the valid children. A paged-out origin is loaded from the
    /// store first. Children that collapse or are condemned are
    /// recorded in the graph but left out of the result.
    ///
    /// # Errors
    ///
    /// [`LatticeError::CoordinateOutOfRange`] for a coordinate outside
    /// the lattice, lookup errors for unknown or sentinel origins, and
    /// [`EngineError::Store`] if a required grid cannot be loaded.
    pub fn permute(
        &mut self,
        id: LatticeId,
        coordinate: Coordinate,
    ) -> Result<Permutation, EngineError> {
        if !coordinate.is_in_bounds() {
            return Err(LatticeError::CoordinateOutOfRange { coordinate }.into());
        }
        self.page_in(id)?;
        let expansion = expand(&mut self.graph, id, coordinate)?;

        let mut children = IndexSet::new();
        let mut condemned = 0;
        for child in expansion.children {
            let processed = self.process(child)?;
            if self.graph.is_valid(processed) {
                children.insert(processed);
            } else {
                condemned += 1;
            }
        }
        debug!(
            lattice = %id,
            %coordinate,
            children = children.len(),
            condemned,
            "permuted"
        );
        Ok(Permutation {
            children: children.into_iter().collect(),
            stats: expansion.stats,
            condemned,
        })
    }

    /// Run `id` through the material rules, paging in any grid the
    /// rules need to read.
    pub fn process(&mut self, id: LatticeId) -> Result<LatticeId, EngineError> {
        loop {
            match self.materials.process(&mut self.graph, id) {
                Err(LatticeError::GridUnavailable { id: paged }) if self.graph.is_paged(paged) => {
                    self.page_in(paged)?;
                }
                other => return other.map_err(EngineError::from),
            }
        }
    }

    // ── Paging ─────────────────────────────────────────────────────

    /// Save `id`'s grid to the store and drop it from memory.
    ///
    /// Already-paged lattices are left alone. If the save fails the grid
    /// stays resident.
    ///
    /// # Errors
    ///
    /// [`LatticeError::SentinelGrid`] for sentinels, [`EngineError::Store`]
    /// if the save fails.
    pub fn page_out(&mut self, id: LatticeId) -> Result<(), EngineError> {
        if self.graph.is_paged(id) {
            return Ok(());
        }
        let grid = self.graph.grid(id)?;
        self.store.save(id, grid)?;
        self.graph.take_grid(id)?;
        trace!(lattice = %id, "paged out");
        Ok(())
    }

    /// Load `id`'s grid from the store if it is paged out.
    ///
    /// If the load fails the lattice stays paged and can be retried.
    pub fn page_in(&mut self, id: LatticeId) -> Result<(), EngineError> {
        if !self.graph.lattice(id)?.is_paged() {
            return Ok(());
        }
        let grid = self.store.load(id)?;
        self.graph.restore_grid(id, grid)?;
        trace!(lattice = %id, "paged in");
        Ok(())
    }
}

impl<S: GridStore + std::fmt::Debug> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("lattices", &self.graph.len())
            .field("deltas", &self.graph.delta_count())
            .field("materials", &self.materials)
            .field("store", &self.store)
            .finish()
    }
}
