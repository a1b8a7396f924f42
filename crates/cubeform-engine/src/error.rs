//! Error type for engine operations.

use cubeform_core::LatticeError;
use cubeform_lattice::ConfigError;
use cubeform_store::StoreError;
use std::error::Error;
use std::fmt;

/// Errors surfaced by [`Engine`](crate::Engine) and [`Explorer`](crate::Explorer).
#[derive(Debug)]
pub enum EngineError {
    /// A lattice lookup or mutation request failed.
    Lattice(LatticeError),
    /// Saving or loading a grid failed. The affected lattice is left in
    /// the state it had before the call.
    Store(StoreError),
    /// The configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
            Self::Store(e) => write!(f, "store error: {e}"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<LatticeError> for EngineError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
