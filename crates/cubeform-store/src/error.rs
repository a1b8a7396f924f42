//! Error types for grid persistence.

use cubeform_core::LatticeId;
use std::fmt;
use std::io;

/// Errors that can occur while saving, loading, or decoding a grid.
#[derive(Debug)]
pub enum StoreError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// No grid is stored under this id.
    NotFound {
        /// The missing id.
        id: LatticeId,
    },
    /// The data does not start with the expected `b"CUBE"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// The grid could not be decoded (truncated, incomplete, or corrupt data).
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NotFound { id } => write!(f, "no grid stored for lattice {id}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"CUBE\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed grid: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
