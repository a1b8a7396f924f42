//! Benchmark profiles for the Cubeform deformation engine.
//!
//! Provides pre-built [`EngineConfig`] profiles for benchmarking and the
//! demos:
//!
//! - [`reference_profile`]: 32 expansions, identity dedup
//! - [`stress_profile`]: 256 expansions, content dedup
//! - [`warm_engine`]: an engine that has already explored `n` lattices

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cubeform_engine::{Engine, EngineConfig, EngineError, Explorer};
use cubeform_lattice::{DedupPolicy, GeometryConfig};
use cubeform_store::MemoryStore;

/// Build a reference profile: default geometry and materials, 32
/// expansions, children paged to memory.
pub fn reference_profile() -> EngineConfig {
    EngineConfig {
        max_expansions: Some(32),
        ..EngineConfig::default()
    }
}

/// Build a stress profile: content dedup so equal grids collapse onto one
/// lattice, 256 expansions.
pub fn stress_profile() -> EngineConfig {
    EngineConfig {
        geometry: GeometryConfig {
            dedup: DedupPolicy::Content,
            ..GeometryConfig::default()
        },
        max_expansions: Some(256),
        ..EngineConfig::default()
    }
}

/// An in-memory engine that has already expanded `n` lattices, plus the
/// explorer positioned to continue.
pub fn warm_engine(
    config: EngineConfig,
    n: usize,
) -> Result<(Engine<MemoryStore>, Explorer), EngineError> {
    let mut engine = Engine::new(config, MemoryStore::new())?;
    let mut explorer = Explorer::from_default(&engine);
    for _ in 0..n {
        if explorer.step(&mut engine)?.is_none() {
            break;
        }
    }
    Ok((engine, explorer))
}
