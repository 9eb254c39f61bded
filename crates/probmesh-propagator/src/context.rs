//! Execution context passed to propagators during a diffusion step.
//!
//! [`StepContext`] separates the frozen read state (field snapshot, mesh,
//! observations) from the only writable buffer, the per-triangle deltas.

use probmesh_core::{ObservationSource, PropagatorError, TickId};
use probmesh_mesh::MeshTopology;

/// Execution context passed to each propagator's `step()` method.
///
/// # Snapshot semantics
///
/// [`previous()`](Self::previous) is the field as it stood when the step
/// began; it does not change while the step runs. All writes go to
/// [`deltas()`](Self::deltas), a zero-initialized buffer the engine adds
/// to the field (with clamping) once the propagator returns `Ok`. A step is
/// therefore independent of the order in which triangles are visited.
pub struct StepContext<'a> {
    previous: &'a [f32],
    deltas: &'a mut [f32],
    mesh: &'a MeshTopology,
    observations: &'a dyn ObservationSource,
    tick_id: TickId,
    donors: usize,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the engine, not by propagators directly.
    pub fn new(
        previous: &'a [f32],
        deltas: &'a mut [f32],
        mesh: &'a MeshTopology,
        observations: &'a dyn ObservationSource,
        tick_id: TickId,
    ) -> Self {
        Self {
            previous,
            deltas,
            mesh,
            observations,
            tick_id,
            donors: 0,
        }
    }

    /// Frozen tick-start probabilities, one per triangle.
    pub fn previous(&self) -> &'a [f32] {
        self.previous
    }

    /// Delta buffer the engine commits after the step.
    pub fn deltas(&mut self) -> &mut [f32] {
        self.deltas
    }

    /// Mesh topology the field is indexed by.
    pub fn mesh(&self) -> &'a MeshTopology {
        self.mesh
    }

    /// Which triangles are directly observed this tick.
    pub fn observations(&self) -> &'a dyn ObservationSource {
        self.observations
    }

    /// The tick being computed.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// Record how many triangles gave mass this step. Rules that do not
    /// call this report zero.
    pub fn report_donors(&mut self, donors: usize) {
        self.donors = donors;
    }

    /// Donor count reported by the rule, `0` if none was reported.
    pub fn donors(&self) -> usize {
        self.donors
    }

    /// Check that the snapshot, the delta buffer, and the mesh agree on
    /// the triangle count.
    pub fn check_sizes(&self) -> Result<(), PropagatorError> {
        let expected = self.mesh.triangle_count();
        for got in [self.previous.len(), self.deltas.len()] {
            if got != expected {
                return Err(PropagatorError::SizeMismatch { expected, got });
            }
        }
        Ok(())
    }
}
