//! Hand-built grids for material and expansion tests.
//!
//! All fixtures start from [`Grid::unit_cube`]. Spatial Z runs along the
//! first grid index, so `(1, y, z)` is the middle horizontal slice.

use cubeform_core::{Coordinate, Point};
use cubeform_lattice::{GeometryConfig, Grid, LatticeGraph};

fn c(x: i32, y: i32, z: i32) -> Coordinate {
    Coordinate::new(x, y, z)
}

fn set_z(grid: &mut Grid, at: Coordinate, z: f32) {
    let p = grid[at];
    grid[at] = Point::new(p.x, p.y, z);
}

/// Every point flattened onto `z = 0`. Fails the volume check.
pub fn collapsed_z_grid() -> Grid {
    Grid::from_fn(|at| {
        let p = Grid::unit_cube()[at];
        Point::new(p.x, p.y, 0.0)
    })
}

/// The middle slice dips below the bottom slice at one column.
/// Fails the solid rule.
pub fn z_folded_grid() -> Grid {
    let mut g = Grid::unit_cube();
    set_z(&mut g, c(0, 0, 0), -0.5);
    set_z(&mut g, c(1, 0, 0), -0.6);
    g
}

/// One steep pair on the middle slice: `(1,0,0)` sits 0.46 above
/// `(1,1,0)`, its other neighbours are raised so nothing else is steep.
/// One flowable pass brings the gap to 0.23.
pub fn slope_spike_grid() -> Grid {
    let mut g = Grid::unit_cube();
    set_z(&mut g, c(1, 0, 0), 0.46);
    set_z(&mut g, c(1, 0, 1), 0.2);
    set_z(&mut g, c(1, 1, 1), 0.2);
    g
}

/// A single raised point in the middle of the top slice.
pub fn lone_spike_grid(height: f32) -> Grid {
    let mut g = Grid::unit_cube();
    let at = c(2, 1, 1);
    let z = g[at].z + height;
    set_z(&mut g, at, z);
    g
}

/// A graph with default geometry.
pub fn fresh_graph() -> LatticeGraph {
    graph_with(GeometryConfig::default())
}

/// A graph with the given geometry.
///
/// # Panics
///
/// If `config` is rejected.
pub fn graph_with(config: GeometryConfig) -> LatticeGraph {
    match LatticeGraph::new(config) {
        Ok(graph) => graph,
        Err(e) => panic!("fixture geometry rejected: {e}"),
    }
}
