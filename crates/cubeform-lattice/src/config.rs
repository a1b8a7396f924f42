//! Geometry configuration, validation, and error types.
//!
//! [`GeometryConfig`] carries the numeric knobs of the mutation engine.
//! [`validate()`](GeometryConfig::validate) runs once when a
//! [`LatticeGraph`](crate::LatticeGraph) is constructed.

use cubeform_core::{FOLD_GAP_STEPS, STEP_SIZE, VOLUME_THRESHOLD};
use std::error::Error;
use std::fmt;

// ── DedupPolicy ────────────────────────────────────────────────────

/// How new grids are assigned identities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Every derived grid gets a fresh id, even if an equal grid already
    /// exists. Exploration can revisit equivalent lattices indefinitely.
    #[default]
    Identity,
    /// Grids are keyed by a content hash; deriving a grid equal to an
    /// existing lattice returns that lattice's id.
    Content,
}

// ── GeometryConfig ─────────────────────────────────────────────────

/// Numeric parameters of the mutation engine.
#[derive(Clone, Debug)]
pub struct GeometryConfig {
    /// Distance a single nudge moves a point. Default: 0.04.
    pub step_size: f32,
    /// Minimum summed spread between opposite faces, per axis. Default: 0.4.
    pub volume_threshold: f32,
    /// Minimum gap between a moved point and its co-mutated neighbour,
    /// in multiples of `step_size`. Default: 10.
    pub fold_gap_steps: f32,
    /// Identity assignment for derived grids. Default: [`DedupPolicy::Identity`].
    pub dedup: DedupPolicy,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            step_size: STEP_SIZE,
            volume_threshold: VOLUME_THRESHOLD,
            fold_gap_steps: FOLD_GAP_STEPS,
            dedup: DedupPolicy::Identity,
        }
    }
}

impl GeometryConfig {
    /// Smallest allowed gap on a moved axis, `step_size * fold_gap_steps`.
    pub fn min_fold_gap(&self) -> f32 {
        self.step_size * self.fold_gap_steps
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 || self.step_size >= 1.0 {
            return Err(ConfigError::InvalidStepSize {
                value: self.step_size,
            });
        }
        if !self.volume_threshold.is_finite() || self.volume_threshold < 0.0 {
            return Err(ConfigError::InvalidVolumeThreshold {
                value: self.volume_threshold,
            });
        }
        if !self.fold_gap_steps.is_finite() || self.fold_gap_steps < 0.0 {
            return Err(ConfigError::InvalidFoldGap {
                value: self.fold_gap_steps,
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating engine or material configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `step_size` is not finite or not in `(0, 1)`.
    InvalidStepSize {
        /// The rejected value.
        value: f32,
    },
    /// `volume_threshold` is not finite or negative.
    InvalidVolumeThreshold {
        /// The rejected value.
        value: f32,
    },
    /// `fold_gap_steps` is not finite or negative.
    InvalidFoldGap {
        /// The rejected value.
        value: f32,
    },
    /// A material slope threshold is not finite or not positive.
    InvalidSlopeThreshold {
        /// The rejected value.
        value: f32,
    },
    /// A material plane count is outside `1..=3`.
    InvalidPlaneCount {
        /// The rejected value.
        value: usize,
    },
    /// A repair pass budget of zero.
    ZeroRepairPasses,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStepSize { value } => {
                write!(f, "step_size must be finite and in (0, 1), got {value}")
            }
            Self::InvalidVolumeThreshold { value } => {
                write!(f, "volume_threshold must be finite and >= 0, got {value}")
            }
            Self::InvalidFoldGap { value } => {
                write!(f, "fold_gap_steps must be finite and >= 0, got {value}")
            }
            Self::InvalidSlopeThreshold { value } => {
                write!(f, "slope threshold must be finite and positive, got {value}")
            }
            Self::InvalidPlaneCount { value } => {
                write!(f, "plane count must be in 1..=3, got {value}")
            }
            Self::ZeroRepairPasses => write!(f, "repair pass budget must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GeometryConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.min_fold_gap() - 0.4).abs() < 1e-6);
        assert_eq!(config.dedup, DedupPolicy::Identity);
    }

    #[test]
    fn rejects_bad_step_size() {
        for bad in [0.0, -0.04, 1.0, f32::NAN, f32::INFINITY] {
            let config = GeometryConfig {
                step_size: bad,
                ..GeometryConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidStepSize { .. })
            ));
        }
    }

    #[test]
    fn rejects_negative_threshold() {
        let config = GeometryConfig {
            volume_threshold: -0.1,
            ..GeometryConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidVolumeThreshold { .. })
        ));
    }
}
