//! Per-tick report for the diffusion engine.

use probmesh_core::TickId;

/// What a single committed diffusion step did.
///
/// `mass_after` may exceed `mass_before`: receivers are never limited by
/// the donor floor, so diffusion does not conserve the field sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick this step committed.
    pub tick_id: TickId,
    /// Triangles the rule counted as donors; `0` for rules that do not
    /// report one.
    pub donors: usize,
    /// Size of the observation mask when the step ran.
    pub observed: usize,
    /// Field sum before the commit.
    pub mass_before: f64,
    /// Field sum after the commit.
    pub mass_after: f64,
}

impl TickReport {
    /// `mass_after - mass_before`.
    pub fn mass_change(&self) -> f64 {
        self.mass_after - self.mass_before
    }
}
