//! Integer grid positions and neighbour stepping.

use crate::axis::{Axis, Direction};
use crate::GRID_SIZE;
use smallvec::SmallVec;
use std::fmt;

/// One of the 27 positions of a lattice, or the out-of-bounds sentinel.
///
/// The fields are *grid* indices in `[0, 2]`, stored in the order the
/// grid is indexed (`grid[x][y][z]`). They are not spatial axes: see
/// [`Axis::grid_dimension`] for how a spatial axis picks its index.
///
/// Stepping off the grid never fails; it yields
/// [`Coordinate::OUT_OF_BOUNDS`], and stepping from the sentinel yields
/// the sentinel again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// First grid index (tracks spatial Z).
    pub x: i32,
    /// Second grid index (tracks spatial Y).
    pub y: i32,
    /// Third grid index (tracks spatial X).
    pub z: i32,
}

impl Coordinate {
    /// Sentinel returned when a step leaves the grid.
    pub const OUT_OF_BOUNDS: Coordinate = Coordinate {
        x: -1,
        y: -1,
        z: -1,
    };

    /// Construct a coordinate. No range check is performed.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Grid indices as an array, `[x, y, z]`.
    pub const fn components(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Whether every component lies in `[0, 2]`.
    pub fn is_in_bounds(self) -> bool {
        self.components()
            .iter()
            .all(|&c| c >= 0 && c < GRID_SIZE as i32)
    }

    /// Whether this is the [`OUT_OF_BOUNDS`](Self::OUT_OF_BOUNDS) sentinel.
    pub fn is_out_of_bounds(self) -> bool {
        self == Self::OUT_OF_BOUNDS
    }

    /// Grid index along the dimension that tracks spatial `axis`.
    pub fn index_along(self, axis: Axis) -> i32 {
        self.components()[axis.grid_dimension()]
    }

    /// Copy of this coordinate with the index tracking `axis` replaced.
    pub fn with_index(self, axis: Axis, index: i32) -> Self {
        let mut c = self.components();
        c[axis.grid_dimension()] = index;
        Self::new(c[0], c[1], c[2])
    }

    /// Whether this position sits on the lattice boundary along `axis`.
    ///
    /// Only boundary positions (index 0 or 2) may move along an axis;
    /// the centre index 1 is interior.
    pub fn is_boundary(self, axis: Axis) -> bool {
        let i = self.index_along(axis);
        i == 0 || i == GRID_SIZE as i32 - 1
    }

    /// Neighbour one grid step along spatial `axis`.
    pub fn step(self, axis: Axis, direction: Direction) -> Self {
        if self.is_out_of_bounds() {
            return Self::OUT_OF_BOUNDS;
        }
        let next = self.index_along(axis) + direction.offset();
        if next < 0 || next >= GRID_SIZE as i32 {
            return Self::OUT_OF_BOUNDS;
        }
        self.with_index(axis, next)
    }

    /// Neighbour that accompanies an increase along `axis`.
    pub fn next(self, axis: Axis) -> Self {
        self.step(axis, Direction::Next)
    }

    /// Neighbour that accompanies a decrease along `axis`.
    pub fn prior(self, axis: Axis) -> Self {
        self.step(axis, Direction::Prior)
    }

    /// The 8-connected neighbours on this coordinate's horizontal plane.
    ///
    /// Clockwise from north: N, NE, E, SE, S, SW, W, NW. Positions that
    /// fall off the grid are omitted, so corners have 3 neighbours and
    /// edges 5.
    pub fn plane_neighbours(self) -> SmallVec<[Coordinate; 8]> {
        let north = self.next(Axis::Y);
        let east = self.next(Axis::X);
        let south = self.prior(Axis::Y);
        let west = self.prior(Axis::X);
        [
            north,
            north.next(Axis::X),
            east,
            east.prior(Axis::Y),
            south,
            south.prior(Axis::X),
            west,
            west.next(Axis::Y),
        ]
        .into_iter()
        .filter(|c| !c.is_out_of_bounds())
        .collect()
    }

    /// Position in canonical traversal order (`x`-major, then `y`, then `z`).
    ///
    /// Returns `None` for out-of-range coordinates.
    pub fn canonical_rank(self) -> Option<usize> {
        if !self.is_in_bounds() {
            return None;
        }
        let n = GRID_SIZE;
        Some(self.x as usize * n * n + self.y as usize * n + self.z as usize)
    }

    /// All 27 in-bounds coordinates in canonical order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        let n = GRID_SIZE as i32;
        (0..n).flat_map(move |x| (0..n).flat_map(move |y| (0..n).map(move |z| Self::new(x, y, z))))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
