//! Explore the reference profile and print what was found.
//!
//! Demonstrates: build config → Engine → Explorer::run → inspect the graph.

use cubeform_bench::reference_profile;
use cubeform_engine::{Engine, Explorer};
use cubeform_store::MemoryStore;

fn main() {
    println!("=== Cubeform exploration ===\n");

    let mut engine = Engine::new(reference_profile(), MemoryStore::new()).unwrap();
    let mut explorer = Explorer::from_default(&engine);
    let report = explorer.run(&mut engine).unwrap();

    println!("expanded   {}", report.expanded);
    println!("produced   {}", report.produced);
    println!("condemned  {}", report.condemned);
    println!("remaining  {}", report.remaining);
    println!();
    println!("candidates {}", report.stats.candidates);
    println!("clamped    {}", report.stats.clamped);
    println!("frontier   {}", report.stats.out_of_bounds);
    println!("folded     {}", report.stats.folded);
    println!("duplicate  {}", report.stats.duplicate);
    println!("collapsed  {}", report.stats.collapsed);
    println!();
    println!(
        "graph: {} lattices, {} deltas, {} grids paged",
        engine.graph().len(),
        engine.graph().delta_count(),
        engine.store().len()
    );
}
