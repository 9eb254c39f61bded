//! Engine configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use probmesh_core::FieldError;
use probmesh_propagators::{
    OccupancyDiffusion, RuleParameterError, MIN_PROPAGATION_THRESHOLD, UNCERTAINTY_FLOOR,
};

// ── EngineConfig ───────────────────────────────────────────────────

/// Construction-time settings for a
/// [`DiffusionEngine`](crate::engine::DiffusionEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Seconds of accumulated time per diffusion step. `0` disables
    /// time-driven ticking. Default: 1.0.
    pub tick_period_secs: f64,
    /// Triangles below this probability do not donate. Default: 0.05.
    pub min_propagation_threshold: f32,
    /// Donors cannot push themselves below this value. Default: 0.5.
    pub uncertainty_floor: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period_secs: 1.0,
            min_propagation_threshold: MIN_PROPAGATION_THRESHOLD,
            uncertainty_floor: UNCERTAINTY_FLOOR,
        }
    }
}

impl EngineConfig {
    /// Check every setting. Called by the engine constructors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_period_secs.is_finite() || self.tick_period_secs < 0.0 {
            return Err(ConfigError::InvalidTickPeriod {
                value: self.tick_period_secs,
            });
        }
        self.rule()?;
        Ok(())
    }

    /// The default diffusion rule with this config's threshold and floor.
    pub(crate) fn rule(&self) -> Result<OccupancyDiffusion, ConfigError> {
        Ok(OccupancyDiffusion::new(
            self.min_propagation_threshold,
            self.uncertainty_floor,
        )?)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `tick_period_secs` is NaN, infinite, or negative.
    InvalidTickPeriod {
        /// The invalid value.
        value: f64,
    },
    /// `min_propagation_threshold` is outside `[0, 1]` or NaN.
    InvalidThreshold {
        /// The invalid value.
        value: f32,
    },
    /// `uncertainty_floor` is outside `[0, 1]` or NaN.
    InvalidFloor {
        /// The invalid value.
        value: f32,
    },
    /// Initial probabilities do not cover the mesh exactly.
    FieldSizeMismatch {
        /// Triangle count of the mesh.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// An initial probability was rejected.
    Field(FieldError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTickPeriod { value } => {
                write!(f, "tick_period_secs must be finite and >= 0, got {value}")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "min_propagation_threshold must be in [0, 1], got {value}")
            }
            Self::InvalidFloor { value } => {
                write!(f, "uncertainty_floor must be in [0, 1], got {value}")
            }
            Self::FieldSizeMismatch { expected, got } => {
                write!(f, "{got} initial probabilities for {expected} triangles")
            }
            Self::Field(e) => write!(f, "invalid initial probability: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<RuleParameterError> for ConfigError {
    fn from(e: RuleParameterError) -> Self {
        match e {
            RuleParameterError::Threshold { value } => Self::InvalidThreshold { value },
            RuleParameterError::Floor { value } => Self::InvalidFloor { value },
        }
    }
}
