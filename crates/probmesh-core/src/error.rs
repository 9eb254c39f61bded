//! Error types shared across the workspace.
//!
//! Organized by subsystem: probability field access, propagator execution,
//! and engine steps. Out-of-range indices are programmer errors and always
//! surface as an `Err`; queries with no answer (`argmax` on an empty field,
//! a point outside the mesh) are `None`, not errors.

use std::error::Error;
use std::fmt;

/// Errors from [`ProbabilityField`](crate::ProbabilityField) access.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A triangle index outside `[0, len)` was used.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of triangles in the field.
        len: usize,
    },
    /// A NaN was written; clamping cannot turn it into a probability.
    NotFinite {
        /// The rejected value.
        value: f32,
    },
    /// A bulk update did not match the field length.
    LengthMismatch {
        /// Number of triangles in the field.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "triangle index {index} out of range [0, {len})")
            }
            Self::NotFinite { value } => write!(f, "probability {value} is not a number"),
            Self::LengthMismatch { expected, got } => {
                write!(f, "expected {expected} values, got {got}")
            }
        }
    }
}

impl Error for FieldError {}

/// Errors from individual propagator execution.
///
/// Returned by `Propagator::step()` and wrapped in
/// [`StepError::PropagatorFailed`] by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagatorError {
    /// The propagator's step function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The step context buffers disagree with the mesh triangle count.
    SizeMismatch {
        /// Triangle count of the mesh.
        expected: usize,
        /// Length of the offending buffer.
        got: usize,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::SizeMismatch { expected, got } => {
                write!(f, "buffer has {got} cells, mesh has {expected} triangles")
            }
        }
    }
}

impl Error for PropagatorError {}

/// Errors from a single engine diffusion step.
///
/// A failed step never mutates the probability field.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The propagator returned an error.
    PropagatorFailed {
        /// Name of the failing propagator.
        name: String,
        /// The underlying propagator error.
        reason: PropagatorError,
    },
    /// Committing the computed deltas failed.
    Field(FieldError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropagatorFailed { name, reason } => {
                write!(f, "propagator '{name}' failed: {reason}")
            }
            Self::Field(e) => write!(f, "commit failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PropagatorFailed { reason, .. } => Some(reason),
            Self::Field(e) => Some(e),
        }
    }
}

impl From<FieldError> for StepError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}
