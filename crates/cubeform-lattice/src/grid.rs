//! The 3×3×3 point array backing a lattice.

use crate::delta::Change;
use crate::hash::grid_hash;
use cubeform_core::{Axis, Coordinate, LatticeError, Point, Vector3, GRID_CELLS, GRID_SIZE};
use std::ops::{Index, IndexMut};

const N: usize = GRID_SIZE;

/// Quantized components of every point in canonical order.
///
/// Two grids with equal keys are the same lattice geometry under content
/// deduplication.
pub type ContentKey = [[i32; 3]; GRID_CELLS];

/// A 3×3×3 array of [`Point`]s indexed by [`Coordinate`].
///
/// Indexing with an out-of-range coordinate panics, like slice indexing;
/// use [`get`](Grid::get) for a checked lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    points: [[[Point; N]; N]; N],
}

impl Grid {
    /// Build a grid by evaluating `f` at every coordinate.
    pub fn from_fn(mut f: impl FnMut(Coordinate) -> Point) -> Self {
        let mut points = [[[Point::default(); N]; N]; N];
        for c in Coordinate::all() {
            points[c.x as usize][c.y as usize][c.z as usize] = f(c);
        }
        Self { points }
    }

    /// The canonical starting geometry: 27 evenly spaced points spanning
    /// `[-1, 1]³`.
    pub fn unit_cube() -> Self {
        Self::from_fn(|c| {
            let at = |axis: Axis| (c.index_along(axis) - 1) as f32;
            Point::new(at(Axis::X), at(Axis::Y), at(Axis::Z))
        })
    }

    /// Checked lookup.
    pub fn get(&self, coordinate: Coordinate) -> Option<Point> {
        coordinate
            .is_in_bounds()
            .then(|| self.points[coordinate.x as usize][coordinate.y as usize][coordinate.z as usize])
    }

    /// All positions with their points, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Point)> + '_ {
        Coordinate::all().map(move |c| (c, self[c]))
    }

    /// Apply every change by co-mutation, clamping into `[-1, 1]`.
    ///
    /// Changes to the same coordinate accumulate in order.
    pub fn apply(&self, changes: &[Change]) -> Result<Grid, LatticeError> {
        let mut next = self.clone();
        for change in changes {
            if !change.coordinate.is_in_bounds() {
                return Err(LatticeError::CoordinateOutOfRange {
                    coordinate: change.coordinate,
                });
            }
            let moved = next[change.coordinate].co_mutate(change.vector);
            next[change.coordinate] = moved;
        }
        Ok(next)
    }

    /// Summed absolute spread between the two opposite faces along `axis`.
    ///
    /// Compares every point on the index-0 face with its counterpart on
    /// the index-2 face, using the point component for that same axis.
    pub fn face_spread(&self, axis: Axis) -> f32 {
        let last = (N - 1) as i32;
        Coordinate::all()
            .filter(|c| c.index_along(axis) == 0)
            .map(|c| (self[c].get(axis) - self[c.with_index(axis, last)].get(axis)).abs())
            .sum()
    }

    /// Whether the grid keeps at least `threshold` spread on every axis.
    ///
    /// A grid failing this has collapsed to near-zero thickness and must
    /// be replaced by the Invalid sentinel.
    pub fn is_volumetric(&self, threshold: f32) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.face_spread(axis) >= threshold)
    }

    /// Coordinate-wise changes that take `self` to `other`.
    ///
    /// Unchanged positions are omitted.
    pub fn diff(&self, other: &Grid) -> Vec<Change> {
        self.iter()
            .filter_map(|(c, p)| {
                let vector = p.delta_to(other[c]);
                (!vector.is_zero()).then_some(Change::new(c, vector))
            })
            .collect()
    }

    /// FNV-1a hash over the quantized grid.
    pub fn content_hash(&self) -> u64 {
        grid_hash(self)
    }

    /// Quantized points in canonical order, the exact identity behind
    /// [`content_hash`](Grid::content_hash).
    pub fn content_key(&self) -> ContentKey {
        let mut key = [[0; 3]; GRID_CELLS];
        for (slot, (_, point)) in key.iter_mut().zip(self.iter()) {
            let [x, y, z] = point.to_array();
            *slot = Vector3::new(x, y, z).quantized();
        }
        key
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::unit_cube()
    }
}

impl Index<Coordinate> for Grid {
    type Output = Point;

    fn index(&self, c: Coordinate) -> &Point {
        &self.points[c.x as usize][c.y as usize][c.z as usize]
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, c: Coordinate) -> &mut Point {
        &mut self.points[c.x as usize][c.y as usize][c.z as usize]
    }
}
