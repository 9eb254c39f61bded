//! Reusable propagator test fixtures.
//!
//! - [`ConstDeltaPropagator`]: adds the same delta to every triangle.
//! - [`CopyObservedPropagator`]: writes `1.0` into observed triangles only,
//!   for checking which observation set a step saw.
//! - [`FailingPropagator`]: fails deterministically after N calls.

use probmesh_core::PropagatorError;
use probmesh_propagator::{Propagator, StepContext};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Writes a constant delta to every triangle.
///
/// Useful for checking the engine's commit and clamp.
pub struct ConstDeltaPropagator {
    pub delta: f32,
}

impl ConstDeltaPropagator {
    pub fn new(delta: f32) -> Self {
        Self { delta }
    }
}

impl Propagator for ConstDeltaPropagator {
    fn name(&self) -> &str {
        "const_delta"
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        ctx.check_sizes()?;
        ctx.deltas().fill(self.delta);
        Ok(())
    }
}

/// Adds `1.0` to every triangle the observation source reports as observed.
pub struct CopyObservedPropagator;

impl Propagator for CopyObservedPropagator {
    fn name(&self) -> &str {
        "copy_observed"
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        ctx.check_sizes()?;
        let observations = ctx.observations();
        for (i, d) in ctx.deltas().iter_mut().enumerate() {
            if observations.is_observed(i) {
                *d = 1.0;
            }
        }
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Useful for testing that a failed tick leaves the field untouched.
/// On success it writes `delta` everywhere, so partial commits are visible.
/// Uses `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingPropagator {
    pub succeed_count: usize,
    pub delta: f32,
    call_count: AtomicUsize,
}

impl FailingPropagator {
    /// Create a propagator that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize, delta: f32) -> Self {
        Self {
            succeed_count,
            delta,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `step()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Propagator for FailingPropagator {
    fn name(&self) -> &str {
        "failing"
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        // Deltas are written before failing; the engine must discard them.
        ctx.deltas().fill(self.delta);
        if n >= self.succeed_count {
            return Err(PropagatorError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(())
    }
}
