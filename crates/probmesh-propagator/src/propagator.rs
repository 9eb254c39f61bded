//! The [`Propagator`] trait.
//!
//! Propagators are stateless update rules executed once per diffusion
//! tick. They read a frozen snapshot and write deltas; the engine owns the
//! commit and the clamp.

use crate::context::StepContext;
use probmesh_core::PropagatorError;

/// A stateless per-tick update rule over a probability field.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same inputs produce identical deltas.
/// - `step()` MUST NOT depend on triangle visiting order; read only
///   [`StepContext::previous`], write only [`StepContext::deltas`].
/// - An `Err` aborts the tick; the engine discards the deltas.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores its rule as
/// `Box<dyn Propagator>`.
///
/// # Examples
///
/// A rule that nudges every triangle toward certainty:
///
/// ```
/// use probmesh_core::{NoObservations, PropagatorError, TickId};
/// use probmesh_mesh::{MeshTopology, Point3};
/// use probmesh_propagator::{Propagator, StepContext};
///
/// struct Nudge(f32);
///
/// impl Propagator for Nudge {
///     fn name(&self) -> &str { "nudge" }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
///         ctx.check_sizes()?;
///         ctx.deltas().fill(self.0);
///         Ok(())
///     }
/// }
///
/// let mesh = MeshTopology::new(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)],
///     &[0, 1, 2],
/// ).unwrap();
/// let previous = [0.5];
/// let mut deltas = [0.0];
/// let mut ctx = StepContext::new(&previous, &mut deltas, &mesh, &NoObservations, TickId(1));
/// Nudge(0.1).step(&mut ctx).unwrap();
/// assert_eq!(deltas, [0.1]);
/// ```
pub trait Propagator: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// Compute one tick of deltas.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError>;
}
