//! Engine configuration.

use cubeform_lattice::{ConfigError, GeometryConfig};
use cubeform_material::FlowableConfig;

/// Everything needed to build an [`Engine`](crate::Engine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Step size, volume threshold, fold guard, and dedup policy.
    pub geometry: GeometryConfig,
    /// Parameters of the flowable material rule.
    pub flowable: FlowableConfig,
    /// Upper bound on lattices the [`Explorer`](crate::Explorer) expands
    /// in one run. `None` = run until the queue drains. Default: `Some(64)`.
    pub max_expansions: Option<usize>,
    /// Page every new child out to the store as soon as it is produced.
    /// Default: true.
    pub page_children: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            flowable: FlowableConfig::default(),
            max_expansions: Some(64),
            page_children: true,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants of every sub-configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.flowable.validate()?;
        Ok(())
    }
}
