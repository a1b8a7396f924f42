//! Geometric properties of `expand` over the default lattice and
//! lattices derived from it.

use cubeform_core::{Coordinate, Point, GRID_SIZE};
use cubeform_lattice::{expand, GeometryConfig, Grid, LatticeGraph};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn graph() -> LatticeGraph {
    LatticeGraph::new(GeometryConfig::default()).unwrap()
}

fn arb_coordinate() -> impl Strategy<Value = Coordinate> {
    let n = GRID_SIZE as i32;
    (0..n, 0..n, 0..n).prop_map(|(x, y, z)| Coordinate::new(x, y, z))
}

fn changed_points(before: &Grid, after: &Grid) -> Vec<Coordinate> {
    before
        .iter()
        .filter(|&(c, p)| !p.approx_eq(after[c], 1e-5))
        .map(|(c, _)| c)
        .collect()
}

// ── Scenarios ───────────────────────────────────────────────────

#[test]
fn default_corner_children_move_by_one_step() {
    let mut graph = graph();
    let origin = graph.default_id();
    let corner = Coordinate::new(0, 0, 0);
    let expansion = expand(&mut graph, origin, corner).unwrap();
    assert!(!expansion.children.is_empty());

    let default = Grid::unit_cube();
    for &child in &expansion.children {
        let grid = graph.grid(child).unwrap();
        let moved = grid[corner];
        let delta = default[corner].delta_to(moved);
        let moved_axes = delta
            .to_array()
            .iter()
            .filter(|d| d.abs() > 1e-6)
            .count();
        assert!((1..=2).contains(&moved_axes), "moved on {moved_axes} axes");
        for d in delta.to_array() {
            assert!(d.abs() < 1e-6 || (d.abs() - 0.04).abs() < 1e-5);
        }

        // The co-mutated neighbour moved by the same vector.
        let changed = changed_points(&default, grid);
        assert_eq!(changed.len(), 2);
        let neighbour = changed.into_iter().find(|&c| c != corner).unwrap();
        let pushed = default[neighbour].delta_to(grid[neighbour]);
        assert_eq!(pushed, delta);
    }
}

#[test]
fn collapsed_z_faces_are_invalid_regardless_of_materials() {
    let mut graph = graph();
    let flat = Grid::from_fn(|c| {
        let p = Grid::unit_cube()[c];
        Point::new(p.x, p.y, p.z * 0.02)
    });
    assert_eq!(graph.insert(flat), graph.invalid_id());
}

#[test]
fn interior_coordinate_yields_nothing() {
    let mut graph = graph();
    let origin = graph.default_id();
    let expansion = expand(&mut graph, origin, Coordinate::new(1, 1, 1)).unwrap();
    assert!(expansion.children.is_empty());
    assert_eq!(expansion.stats.candidates, 0);
    assert_eq!(graph.delta_count(), 0);
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn children_stay_in_bounds(first in arb_coordinate(), second in arb_coordinate()) {
        let mut graph = graph();
        let origin = graph.default_id();
        let children = expand(&mut graph, origin, first).unwrap().children;
        for child in children {
            let grandchildren = expand(&mut graph, child, second).unwrap().children;
            for id in std::iter::once(child).chain(grandchildren) {
                for (_, p) in graph.grid(id).unwrap().iter() {
                    prop_assert!(p.is_within_bounds());
                }
            }
        }
    }

    #[test]
    fn every_child_has_a_two_change_delta_from_its_parent(c in arb_coordinate()) {
        let mut graph = graph();
        let origin = graph.default_id();
        let children = expand(&mut graph, origin, c).unwrap().children;
        for child in children {
            let incoming = graph.incoming(child);
            prop_assert_eq!(incoming.len(), 1);
            prop_assert_eq!(incoming[0].origin(), origin);
            prop_assert_eq!(incoming[0].changes().len(), 2);
            prop_assert_eq!(incoming[0].changes()[0].coordinate, c);
        }
    }

    #[test]
    fn children_keep_their_volume(c in arb_coordinate()) {
        let mut graph = graph();
        let origin = graph.default_id();
        let threshold = graph.config().volume_threshold;
        for child in expand(&mut graph, origin, c).unwrap().children {
            prop_assert!(graph.grid(child).unwrap().is_volumetric(threshold));
        }
    }
}
