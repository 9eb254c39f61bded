//! Core abstraction traits.

/// Read-only membership test for "currently observed" triangles.
///
/// The diffusion rule consults this capability but never infers it.
/// Observed triangles neither donate nor receive diffused mass.
/// [`ObservationMask`](crate::ObservationMask) is the usual implementor;
/// [`NoObservations`] is the always-empty default.
pub trait ObservationSource {
    /// Returns `true` if `triangle` is directly observed this tick.
    fn is_observed(&self, triangle: usize) -> bool;
}

/// An observation source that never observes anything.
///
/// Running the diffusion rule against this source yields the plain,
/// visibility-unaware propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoObservations;

impl ObservationSource for NoObservations {
    fn is_observed(&self, _triangle: usize) -> bool {
        false
    }
}

impl<T: ObservationSource + ?Sized> ObservationSource for &T {
    fn is_observed(&self, triangle: usize) -> bool {
        (**self).is_observed(triangle)
    }
}
