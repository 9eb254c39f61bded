//! Observation-aware occupancy diffusion.
//!
//! Each tick, every unobserved triangle holding non-negligible belief pushes
//! part of its excess over each unobserved neighbour into that neighbour:
//!
//! ```text
//! flow    = (1 - p[n]) * MAX_FLOW_FRACTION
//! excess  = max(0, p[i] - p[n])
//! d       = excess * flow / |eligible neighbours of i|
//! delta[n] += d
//! given    += d   only if p[i] - (given + d) >= floor
//! delta[i] -= given
//! ```
//!
//! Receivers are never guarded, donors are. The guard counts only what the
//! donor itself has given this tick, never what it received, so a cell
//! below the floor cannot give at all. A cell above the floor decays
//! toward it and then sticks, while still receiving. Total mass is
//! therefore not conserved: confidence spreads faster than it is given up.

use std::error::Error;
use std::fmt;

use probmesh_core::PropagatorError;
use probmesh_propagator::{Propagator, StepContext};
use smallvec::SmallVec;

/// Donors below this probability do not propagate.
pub const MIN_PROPAGATION_THRESHOLD: f32 = 0.05;

/// Donors cannot push themselves below this value by outflow alone.
pub const UNCERTAINTY_FLOOR: f32 = 0.5;

/// Upper bound on the share of the excess a single exchange can move.
pub const MAX_FLOW_FRACTION: f32 = 0.5;

/// The occupancy diffusion rule.
///
/// Observed triangles (per the context's observation source) are inert:
/// they neither donate nor receive. With
/// [`NoObservations`](probmesh_core::NoObservations) this reduces to plain
/// visibility-unaware propagation.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyDiffusion {
    threshold: f32,
    floor: f32,
}

/// A rule parameter outside `[0, 1]`, or NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RuleParameterError {
    /// The propagation threshold.
    Threshold {
        /// The rejected value.
        value: f32,
    },
    /// The donor floor.
    Floor {
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for RuleParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold { value } => {
                write!(f, "propagation threshold must be in [0, 1], got {value}")
            }
            Self::Floor { value } => write!(f, "donor floor must be in [0, 1], got {value}"),
        }
    }
}

impl Error for RuleParameterError {}

impl Default for OccupancyDiffusion {
    fn default() -> Self {
        Self {
            threshold: MIN_PROPAGATION_THRESHOLD,
            floor: UNCERTAINTY_FLOOR,
        }
    }
}

impl OccupancyDiffusion {
    /// Create a rule with a custom propagation threshold and donor floor.
    ///
    /// Both must be probabilities; NaN is rejected.
    pub fn new(threshold: f32, floor: f32) -> Result<Self, RuleParameterError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RuleParameterError::Threshold { value: threshold });
        }
        if !(0.0..=1.0).contains(&floor) {
            return Err(RuleParameterError::Floor { value: floor });
        }
        Ok(Self { threshold, floor })
    }

    /// Donors below this probability are skipped.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Donor floor.
    pub fn floor(&self) -> f32 {
        self.floor
    }
}

impl Propagator for OccupancyDiffusion {
    fn name(&self) -> &str {
        "occupancy_diffusion"
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        ctx.check_sizes()?;
        let previous = ctx.previous();
        let mesh = ctx.mesh();
        let observations = ctx.observations();
        let deltas = ctx.deltas();
        let mut donors = 0;

        for (i, &p) in previous.iter().enumerate() {
            if observations.is_observed(i) || p < self.threshold {
                continue;
            }
            donors += 1;
            let neighbours = mesh
                .neighbours(i)
                .map_err(|e| PropagatorError::ExecutionFailed {
                    reason: e.to_string(),
                })?;
            let eligible: SmallVec<[usize; 4]> = neighbours
                .iter()
                .copied()
                .filter(|&n| !observations.is_observed(n))
                .collect();
            if eligible.is_empty() {
                continue;
            }
            let share = eligible.len() as f32;

            let mut given = 0.0f32;
            for &n in &eligible {
                let neighbour_p = previous[n];
                let flow = (1.0 - neighbour_p) * MAX_FLOW_FRACTION;
                let d = (p - neighbour_p).max(0.0) * flow / share;
                deltas[n] += d;
                if p - (given + d) >= self.floor {
                    given += d;
                }
            }
            deltas[i] -= given;
        }
        ctx.report_donors(donors);
        Ok(())
    }
}
