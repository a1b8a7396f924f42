//! Candidate enumeration, propagation, and the single-step expansion.
//!
//! [`expand`] is the geometric half of a permute: it nudges one point,
//! co-mutates the neighbour it pushes into, and records every surviving
//! transition as a delta. Material rules are applied afterwards by the
//! caller.

use crate::delta::Change;
use crate::graph::LatticeGraph;
use cubeform_core::{
    Axis, Coordinate, Direction, LatticeError, LatticeId, MutationAxis, Point, Vector3,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Diagonal pairs in enumeration order.
const DIAGONALS: [MutationAxis; 3] = [MutationAxis::XY, MutationAxis::YZ, MutationAxis::XZ];

/// Components below this magnitude do not pick a propagation direction.
const DIRECTION_EPSILON: f32 = 1e-6;

/// A proposed new position for one point, tagged with the axes it used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Position after the nudge.
    pub point: Point,
    /// Axis or axis pair the nudge moved along.
    pub axis: MutationAxis,
}

/// Spatial axes along which `coordinate` sits on the lattice boundary.
pub fn eligible_axes(coordinate: Coordinate) -> SmallVec<[Axis; 3]> {
    Axis::ALL
        .into_iter()
        .filter(|&a| coordinate.is_boundary(a))
        .collect()
}

/// Every one-step nudge of `point` allowed at `coordinate`.
///
/// Single-axis moves come first (increase before decrease per axis),
/// then every sign combination of each eligible axis pair. A nudge that
/// would leave `[-1, 1]` leaves its component unchanged, so some entries
/// may equal `point`; callers drop those.
pub fn candidates(point: Point, coordinate: Coordinate, step: f32) -> SmallVec<[Candidate; 18]> {
    let eligible = eligible_axes(coordinate);
    let mut out = SmallVec::new();

    for &axis in &eligible {
        for direction in Direction::BOTH {
            out.push(Candidate {
                point: point.nudge(axis, direction, step),
                axis: MutationAxis::single(axis),
            });
        }
    }

    for diagonal in DIAGONALS {
        let &[first, second] = diagonal.axes() else {
            continue;
        };
        if !eligible.contains(&first) || !eligible.contains(&second) {
            continue;
        }
        for d1 in Direction::BOTH {
            for d2 in Direction::BOTH {
                out.push(Candidate {
                    point: point.nudge(first, d1, step).nudge(second, d2, step),
                    axis: diagonal,
                });
            }
        }
    }
    out
}

/// The neighbour a move of `delta` along `axis` pushes into.
///
/// Steps once along each axis of the tag in the direction of the delta's
/// sign on that axis. An axis whose component is zero (a diagonal that was
/// clamped on one side) is not stepped. Returns
/// [`Coordinate::OUT_OF_BOUNDS`] if the step leaves the grid or no axis
/// moved.
pub fn propagation_coordinate(coordinate: Coordinate, delta: Vector3, axis: MutationAxis) -> Coordinate {
    let mut next = coordinate;
    let mut moved = false;
    for &a in axis.axes() {
        let component = delta.get(a);
        if component.abs() < DIRECTION_EPSILON {
            continue;
        }
        if let Some(direction) = Direction::of(component) {
            next = next.step(a, direction);
            moved = true;
        }
    }
    if moved {
        next
    } else {
        Coordinate::OUT_OF_BOUNDS
    }
}

/// Anti-fold guard: whether `moved` came within `min_gap` of the
/// co-mutated `neighbour` on any axis the move used.
pub fn folds(moved: Point, neighbour: Point, delta: Vector3, axis: MutationAxis, min_gap: f32) -> bool {
    axis.axes()
        .iter()
        .filter(|&&a| delta.get(a).abs() >= DIRECTION_EPSILON)
        .any(|&a| (moved.get(a) - neighbour.get(a)).abs() < min_gap)
}

/// Why candidates were dropped during an [`expand`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Candidates enumerated.
    pub candidates: usize,
    /// Nudges that would have left `[-1, 1]`.
    pub clamped: usize,
    /// Moves whose propagation neighbour lies outside this lattice.
    pub out_of_bounds: usize,
    /// Moves rejected by the anti-fold guard.
    pub folded: usize,
    /// Moves already recorded from this origin.
    pub duplicate: usize,
    /// Moves whose child failed the volume invariant.
    pub collapsed: usize,
}

impl ExpansionStats {
    /// Add every counter of `other` into `self`.
    pub fn merge(&mut self, other: &ExpansionStats) {
        self.candidates += other.candidates;
        self.clamped += other.clamped;
        self.out_of_bounds += other.out_of_bounds;
        self.folded += other.folded;
        self.duplicate += other.duplicate;
        self.collapsed += other.collapsed;
    }
}

/// Result of one [`expand`].
#[derive(Clone, Debug, Default)]
pub struct Expansion {
    /// New non-sentinel lattices, in candidate order.
    pub children: Vec<LatticeId>,
    /// Drop counters.
    pub stats: ExpansionStats,
}

/// Nudge the point at `coordinate` of lattice `origin` one step in every
/// eligible direction and publish each surviving child.
///
/// Each child is linked to `origin` by a two-change delta (the moved
/// point and its co-mutated neighbour). A child that collapses is
/// replaced by the Invalid sentinel, still linked, and not returned.
/// Moves that push past the lattice edge are linked to the OutOfBounds
/// sentinel with a single change and not returned.
///
/// # Errors
///
/// [`LatticeError::CoordinateOutOfRange`] if `coordinate` is not a
/// lattice position; nothing is recorded in that case. Lookup errors if
/// `origin` is unknown, a sentinel, or paged out.
pub fn expand(
    graph: &mut LatticeGraph,
    origin: LatticeId,
    coordinate: Coordinate,
) -> Result<Expansion, LatticeError> {
    if !coordinate.is_in_bounds() {
        return Err(LatticeError::CoordinateOutOfRange { coordinate });
    }
    let grid = graph.grid(origin)?.clone();
    let step = graph.config().step_size;
    let min_gap = graph.config().min_fold_gap();
    let invalid = graph.invalid_id();
    let out_of_bounds = graph.out_of_bounds_id();

    let original = grid[coordinate];
    let mut expansion = Expansion::default();

    for candidate in candidates(original, coordinate, step) {
        expansion.stats.candidates += 1;
        if candidate.point == original {
            expansion.stats.clamped += 1;
            trace!(%coordinate, axis = %candidate.axis, "dropped: clamped at bound");
            continue;
        }

        let delta = original.delta_to(candidate.point);
        let next = propagation_coordinate(coordinate, delta, candidate.axis);
        if next.is_out_of_bounds() {
            expansion.stats.out_of_bounds += 1;
            trace!(%coordinate, axis = %candidate.axis, "dropped: propagation leaves lattice");
            graph.link(origin, &[Change::new(coordinate, delta)], out_of_bounds)?;
            continue;
        }

        let neighbour = grid[next];
        let pushed = neighbour.co_mutate(delta);
        if folds(candidate.point, pushed, delta, candidate.axis, min_gap) {
            expansion.stats.folded += 1;
            trace!(%coordinate, %next, axis = %candidate.axis, "dropped: fold guard");
            continue;
        }

        let changes = [
            Change::new(coordinate, delta),
            Change::new(next, neighbour.delta_to(pushed)),
        ];
        if graph.find_delta(origin, &changes).is_some() {
            expansion.stats.duplicate += 1;
            trace!(%coordinate, axis = %candidate.axis, "dropped: duplicate delta");
            continue;
        }

        let child = graph.mutate(origin, &changes)?;
        graph.link(origin, &changes, child)?;
        if child == invalid {
            expansion.stats.collapsed += 1;
            trace!(%coordinate, axis = %candidate.axis, "child collapsed");
            continue;
        }
        expansion.children.push(child);
    }

    debug!(
        %origin,
        %coordinate,
        children = expansion.children.len(),
        candidates = expansion.stats.candidates,
        "expanded coordinate"
    );
    Ok(expansion)
}
