//! [`LatticeGraph`]: the context that owns every lattice and delta.

use crate::config::{ConfigError, DedupPolicy, GeometryConfig};
use crate::delta::{Change, Delta, DeltaKey};
use crate::grid::{ContentKey, Grid};
use crate::lattice::{Lattice, LatticeKind};
use cubeform_core::{DeltaId, LatticeError, LatticeId, MaterialId};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Every lattice and delta of one deformation run.
///
/// Replaces process-wide globals: the identity counter and the three
/// well-known lattices (Default, Invalid, OutOfBounds) live here, so two
/// graphs never share state and a test can start from a fresh one.
///
/// Lattices are stored by id; deltas are stored in an append-only list
/// indexed by [`DeltaId`] and keyed by [`DeltaKey`] for deduplication.
/// Under [`DedupPolicy::Content`] lattices are bucketed by content hash and
/// each bucket entry carries the full [`ContentKey`], so a hash collision
/// never merges two different grids.
#[derive(Debug)]
pub struct LatticeGraph {
    config: GeometryConfig,
    next_id: AtomicU64,
    lattices: IndexMap<LatticeId, Lattice>,
    deltas: Vec<Delta>,
    delta_index: IndexMap<DeltaKey, DeltaId>,
    content_index: IndexMap<u64, Vec<(ContentKey, LatticeId)>>,
    default_id: LatticeId,
    invalid_id: LatticeId,
    out_of_bounds_id: LatticeId,
}

impl LatticeGraph {
    /// Create a graph holding the Default lattice and both sentinels.
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: GeometryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut graph = Self {
            config,
            next_id: AtomicU64::new(0),
            lattices: IndexMap::new(),
            deltas: Vec::new(),
            delta_index: IndexMap::new(),
            content_index: IndexMap::new(),
            default_id: LatticeId(0),
            invalid_id: LatticeId(0),
            out_of_bounds_id: LatticeId(0),
        };
        let default_grid = Grid::unit_cube();
        graph.default_id = graph.publish(default_grid);
        graph.invalid_id = graph.publish_sentinel(LatticeKind::Invalid);
        graph.out_of_bounds_id = graph.publish_sentinel(LatticeKind::OutOfBounds);
        Ok(graph)
    }

    fn allocate_id(&self) -> LatticeId {
        LatticeId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn publish(&mut self, grid: Grid) -> LatticeId {
        let hash = grid.content_hash();
        self.publish_hashed(grid, hash)
    }

    fn publish_hashed(&mut self, grid: Grid, hash: u64) -> LatticeId {
        let id = self.allocate_id();
        if self.config.dedup == DedupPolicy::Content {
            self.content_index
                .entry(hash)
                .or_default()
                .push((grid.content_key(), id));
        }
        self.lattices.insert(id, Lattice::regular(id, grid));
        id
    }

    fn find_content(&self, hash: u64, key: &ContentKey) -> Option<LatticeId> {
        self.content_index
            .get(&hash)?
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|&(_, id)| id)
    }

    fn publish_sentinel(&mut self, kind: LatticeKind) -> LatticeId {
        let id = self.allocate_id();
        self.lattices.insert(id, Lattice::sentinel(id, kind));
        id
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Geometry configuration this graph was built with.
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// The canonical unit-cube lattice.
    pub fn default_id(&self) -> LatticeId {
        self.default_id
    }

    /// The Invalid sentinel.
    pub fn invalid_id(&self) -> LatticeId {
        self.invalid_id
    }

    /// The OutOfBounds sentinel.
    pub fn out_of_bounds_id(&self) -> LatticeId {
        self.out_of_bounds_id
    }

    /// Number of lattices, sentinels included.
    pub fn len(&self) -> usize {
        self.lattices.len()
    }

    /// Whether the graph holds no lattices. Never true after [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.lattices.is_empty()
    }

    /// Ids of every lattice in creation order.
    pub fn ids(&self) -> impl Iterator<Item = LatticeId> + '_ {
        self.lattices.keys().copied()
    }

    /// Look up a lattice.
    pub fn get(&self, id: LatticeId) -> Option<&Lattice> {
        self.lattices.get(&id)
    }

    /// Look up a lattice, failing with [`LatticeError::UnknownLattice`].
    pub fn lattice(&self, id: LatticeId) -> Result<&Lattice, LatticeError> {
        self.lattices
            .get(&id)
            .ok_or(LatticeError::UnknownLattice { id })
    }

    fn lattice_mut(&mut self, id: LatticeId) -> Result<&mut Lattice, LatticeError> {
        self.lattices
            .get_mut(&id)
            .ok_or(LatticeError::UnknownLattice { id })
    }

    /// The resident grid of a lattice.
    pub fn grid(&self, id: LatticeId) -> Result<&Grid, LatticeError> {
        self.lattice(id)?.grid()
    }

    /// Whether `id` names a non-sentinel lattice. Unknown ids are not valid.
    pub fn is_valid(&self, id: LatticeId) -> bool {
        self.get(id).is_some_and(Lattice::is_valid)
    }

    // ── Lattice creation ───────────────────────────────────────────

    /// Publish `grid` as a lattice and return its id.
    ///
    /// A grid that fails the volume invariant is never published; the
    /// Invalid sentinel's id is returned instead. Under
    /// [`DedupPolicy::Content`] a grid equal to an existing lattice's
    /// returns that lattice's id.
    pub fn insert(&mut self, grid: Grid) -> LatticeId {
        let hash = grid.content_hash();
        self.insert_hashed(grid, hash)
    }

    fn insert_hashed(&mut self, grid: Grid, hash: u64) -> LatticeId {
        if !grid.is_volumetric(self.config.volume_threshold) {
            trace!("grid collapsed below volume threshold");
            return self.invalid_id;
        }
        if self.config.dedup == DedupPolicy::Content {
            if let Some(existing) = self.find_content(hash, &grid.content_key()) {
                return existing;
            }
        }
        self.publish_hashed(grid, hash)
    }

    /// Apply `changes` to a copy of `origin`'s grid and publish the result.
    ///
    /// Returns `origin` unchanged when every change is zero.
    pub fn mutate(&mut self, origin: LatticeId, changes: &[Change]) -> Result<LatticeId, LatticeError> {
        let grid = self.grid(origin)?;
        if changes.iter().all(|c| c.vector.is_zero()) {
            for change in changes {
                if !change.coordinate.is_in_bounds() {
                    return Err(LatticeError::CoordinateOutOfRange {
                        coordinate: change.coordinate,
                    });
                }
            }
            return Ok(origin);
        }
        let next = grid.apply(changes)?;
        Ok(self.insert(next))
    }

    // ── Deltas ─────────────────────────────────────────────────────

    /// The id of an existing delta with the same origin and change set.
    pub fn find_delta(&self, origin: LatticeId, changes: &[Change]) -> Option<DeltaId> {
        self.delta_index
            .get(&DeltaKey::new(origin, changes))
            .copied()
    }

    /// Record a delta from `origin` to `result`.
    ///
    /// Returns `Ok(None)` when an equal delta already exists; the graph
    /// is unchanged in that case.
    pub fn link(
        &mut self,
        origin: LatticeId,
        changes: &[Change],
        result: LatticeId,
    ) -> Result<Option<DeltaId>, LatticeError> {
        self.lattice(origin)?;
        self.lattice(result)?;
        let key = DeltaKey::new(origin, changes);
        if self.delta_index.contains_key(&key) {
            return Ok(None);
        }
        let id = DeltaId(self.deltas.len() as u32);
        self.deltas.push(Delta::new(origin, changes, result));
        self.delta_index.insert(key, id);
        self.lattice_mut(origin)?.add_delta(id);
        self.lattice_mut(result)?.add_delta(id);
        trace!(%origin, %result, delta = %id, changes = changes.len(), "linked delta");
        Ok(Some(id))
    }

    /// Look up a delta.
    pub fn delta(&self, id: DeltaId) -> Option<&Delta> {
        self.deltas.get(id.0 as usize)
    }

    /// Every delta with its id, in recording order.
    pub fn deltas(&self) -> impl Iterator<Item = (DeltaId, &Delta)> + '_ {
        self.deltas
            .iter()
            .enumerate()
            .map(|(i, d)| (DeltaId(i as u32), d))
    }

    /// Number of recorded deltas.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Deltas whose origin is `id`.
    pub fn outgoing(&self, id: LatticeId) -> Vec<&Delta> {
        self.endpoint_deltas(id)
            .filter(|d| d.origin() == id)
            .collect()
    }

    /// Deltas whose result is `id`.
    pub fn incoming(&self, id: LatticeId) -> Vec<&Delta> {
        self.endpoint_deltas(id)
            .filter(|d| d.result() == id)
            .collect()
    }

    fn endpoint_deltas(&self, id: LatticeId) -> impl Iterator<Item = &Delta> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|l| l.deltas().iter())
            .filter_map(|&d| self.delta(d))
    }

    /// Coordinate-wise changes that take lattice `from` to lattice `to`.
    pub fn diff(&self, from: LatticeId, to: LatticeId) -> Result<Vec<Change>, LatticeError> {
        Ok(self.grid(from)?.diff(self.grid(to)?))
    }

    // ── Materials and tags ─────────────────────────────────────────

    /// Record that `material` passed on `id`.
    ///
    /// Returns `false` if it was already recorded or `id` is a sentinel.
    pub fn mark_material(&mut self, id: LatticeId, material: MaterialId) -> Result<bool, LatticeError> {
        Ok(self.lattice_mut(id)?.add_material(material))
    }

    /// Whether `material` already passed on `id`.
    pub fn has_passed(&self, id: LatticeId, material: MaterialId) -> bool {
        self.get(id).is_some_and(|l| l.has_passed(material))
    }

    /// Add a free-form tag. Returns `false` if it was already present.
    pub fn tag(&mut self, id: LatticeId, tag: impl Into<String>) -> Result<bool, LatticeError> {
        Ok(self.lattice_mut(id)?.add_tag(tag.into()))
    }

    // ── Paging ─────────────────────────────────────────────────────

    /// Whether `id`'s grid is currently paged out.
    pub fn is_paged(&self, id: LatticeId) -> bool {
        self.get(id).is_some_and(Lattice::is_paged)
    }

    /// Remove `id`'s grid from memory, leaving the lattice paged.
    pub fn take_grid(&mut self, id: LatticeId) -> Result<Grid, LatticeError> {
        self.lattice_mut(id)?.take_grid()
    }

    /// Put a grid back into a paged lattice.
    pub fn restore_grid(&mut self, id: LatticeId, grid: Grid) -> Result<(), LatticeError> {
        self.lattice_mut(id)?.restore_grid(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeform_core::{Coordinate, Point, Vector3};

    fn graph() -> LatticeGraph {
        LatticeGraph::new(GeometryConfig::default()).unwrap()
    }

    fn nudge_corner() -> [Change; 2] {
        [
            Change::new(Coordinate::new(0, 0, 0), Vector3::new(0.04, 0.0, 0.0)),
            Change::new(Coordinate::new(0, 0, 1), Vector3::new(0.04, 0.0, 0.0)),
        ]
    }

    #[test]
    fn well_known_lattices() {
        let g = graph();
        assert_eq!(g.default_id(), LatticeId(0));
        assert_eq!(g.invalid_id(), LatticeId(1));
        assert_eq!(g.out_of_bounds_id(), LatticeId(2));
        assert!(g.is_valid(g.default_id()));
        assert!(!g.is_valid(g.invalid_id()));
        assert!(!g.is_valid(g.out_of_bounds_id()));
        assert!(!g.is_valid(LatticeId(99)));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn fresh_graphs_do_not_share_counters() {
        let mut a = graph();
        let b = graph();
        let child = a.mutate(a.default_id(), &nudge_corner()).unwrap();
        assert_eq!(child, LatticeId(3));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GeometryConfig {
            step_size: 0.0,
            ..GeometryConfig::default()
        };
        assert!(LatticeGraph::new(config).is_err());
    }

    #[test]
    fn zero_change_returns_origin() {
        let mut g = graph();
        let origin = g.default_id();
        let zero = [Change::new(Coordinate::new(1, 1, 1), Vector3::ZERO)];
        assert_eq!(g.mutate(origin, &zero).unwrap(), origin);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn mutate_copies_on_write() {
        let mut g = graph();
        let origin = g.default_id();
        let child = g.mutate(origin, &nudge_corner()).unwrap();
        assert_ne!(child, origin);
        assert_eq!(g.grid(origin).unwrap(), &Grid::unit_cube());
        assert_eq!(
            g.grid(child).unwrap()[Coordinate::new(0, 0, 0)],
            Point::new(-0.96, -1.0, -1.0)
        );
    }

    #[test]
    fn collapsing_insert_yields_invalid() {
        let mut g = graph();
        let flat = Grid::from_fn(|_| Point::new(0.0, 0.0, 0.0));
        assert_eq!(g.insert(flat), g.invalid_id());
    }

    #[test]
    fn identity_policy_allocates_per_insert() {
        let mut g = graph();
        let a = g.insert(Grid::unit_cube());
        let b = g.insert(Grid::unit_cube());
        assert_ne!(a, b);
        assert_ne!(a, g.default_id());
    }

    #[test]
    fn content_policy_reuses_equal_grids() {
        let config = GeometryConfig {
            dedup: DedupPolicy::Content,
            ..GeometryConfig::default()
        };
        let mut g = LatticeGraph::new(config).unwrap();
        assert_eq!(g.insert(Grid::unit_cube()), g.default_id());
        let a = g.mutate(g.default_id(), &nudge_corner()).unwrap();
        let b = g.mutate(g.default_id(), &nudge_corner()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn content_policy_separates_colliding_hashes() {
        let config = GeometryConfig {
            dedup: DedupPolicy::Content,
            ..GeometryConfig::default()
        };
        let mut g = LatticeGraph::new(config).unwrap();
        let mut moved = Grid::unit_cube();
        moved[Coordinate::new(0, 0, 0)] = Point::new(-0.96, -1.0, -1.0);
        let bucket = 0x5eed;

        let first = g.insert_hashed(moved.clone(), bucket);
        let other = g.insert_hashed(Grid::unit_cube(), bucket);
        assert_ne!(first, other);
        assert_ne!(other, g.default_id());
        assert_eq!(g.content_index[&bucket].len(), 2);

        assert_eq!(g.insert_hashed(moved, bucket), first);
        assert_eq!(g.insert_hashed(Grid::unit_cube(), bucket), other);
    }

    #[test]
    fn collapsed_grid_is_never_published() {
        let mut g = graph();
        let before = g.len();
        let mut flat = Grid::unit_cube();
        for c in Coordinate::all() {
            let p = flat[c];
            flat[c] = Point::new(p.x, p.y, 0.0);
        }
        assert_eq!(g.insert(flat), g.invalid_id());
        assert_eq!(g.len(), before);
    }

    #[test]
    fn link_deduplicates_and_records_both_endpoints() {
        let mut g = graph();
        let origin = g.default_id();
        let changes = nudge_corner();
        let child = g.mutate(origin, &changes).unwrap();
        let id = g.link(origin, &changes, child).unwrap().unwrap();
        assert_eq!(g.find_delta(origin, &changes), Some(id));
        assert!(g.lattice(origin).unwrap().deltas().contains(&id));
        assert!(g.lattice(child).unwrap().deltas().contains(&id));

        let other = g.mutate(origin, &changes).unwrap();
        assert_eq!(g.link(origin, &changes, other).unwrap(), None);
        assert_eq!(g.delta_count(), 1);

        assert_eq!(g.outgoing(origin).len(), 1);
        assert!(g.incoming(origin).is_empty());
        assert_eq!(g.incoming(child).len(), 1);
        assert_eq!(g.diff(origin, child).unwrap().len(), 2);
    }

    #[test]
    fn link_rejects_unknown_endpoint() {
        let mut g = graph();
        let err = g.link(g.default_id(), &[], LatticeId(42)).unwrap_err();
        assert_eq!(err, LatticeError::UnknownLattice { id: LatticeId(42) });
    }

    #[test]
    fn materials_and_tags() {
        let mut g = graph();
        let id = g.default_id();
        assert!(g.mark_material(id, MaterialId(0)).unwrap());
        assert!(!g.mark_material(id, MaterialId(0)).unwrap());
        assert!(g.has_passed(id, MaterialId(0)));
        assert!(!g.mark_material(g.invalid_id(), MaterialId(0)).unwrap());
        assert!(g.tag(id, "seed").unwrap());
        assert!(g.lattice(id).unwrap().has_tag("seed"));
    }

    #[test]
    fn paged_lattice_refuses_mutation() {
        let mut g = graph();
        let id = g.default_id();
        let grid = g.take_grid(id).unwrap();
        assert!(g.is_paged(id));
        assert_eq!(
            g.mutate(id, &nudge_corner()).unwrap_err(),
            LatticeError::GridUnavailable { id }
        );
        g.restore_grid(id, grid).unwrap();
        assert!(g.mutate(id, &nudge_corner()).is_ok());
    }
}
