//! The owned diffusion aggregate and its tick loop.
//!
//! # Ownership model
//!
//! [`DiffusionEngine`] is [`Send`] but not [`Sync`]: one instance per
//! tracked area, driven from one logical thread. All mutating methods take
//! `&mut self`, so a step can never observe a half-applied observation
//! update or field write.

use probmesh_core::{
    FieldError, ObservationMask, ProbabilityField, StepError, TickId, UNCERTAIN,
};
use probmesh_mesh::{MeshError, MeshTopology, Point3};
use probmesh_propagator::{Propagator, StepContext};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::TickReport;

const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<DiffusionEngine>();
    }
};

/// Whether time-driven ticking is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed or stopped; [`advance`](DiffusionEngine::advance) does
    /// nothing.
    #[default]
    Idle,
    /// [`advance`](DiffusionEngine::advance) accumulates time and steps.
    Active,
}

/// Mesh, probability field, observation mask, and the rule that diffuses
/// belief between them.
///
/// # Examples
///
/// ```
/// use probmesh_engine::{DiffusionEngine, EngineConfig};
/// use probmesh_mesh::{MeshTopology, Point3};
///
/// let mesh = MeshTopology::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 1.0),
///     ],
///     &[0, 1, 2, 1, 3, 2],
/// )
/// .unwrap();
/// let mut engine =
///     DiffusionEngine::with_probabilities(mesh, vec![1.0, 0.0], EngineConfig::default()).unwrap();
///
/// engine.start();
/// assert!(engine.advance(0.6).unwrap().is_none());
/// let report = engine.advance(0.6).unwrap().expect("period elapsed");
/// assert_eq!(report.tick_id.0, 1);
/// assert_eq!(engine.field().as_slice(), &[0.5, 0.5]);
/// ```
pub struct DiffusionEngine {
    mesh: MeshTopology,
    field: ProbabilityField,
    observations: ObservationMask,
    propagator: Box<dyn Propagator>,
    config: EngineConfig,
    state: EngineState,
    accumulator: f64,
    tick_id: TickId,
}

impl DiffusionEngine {
    /// Create an engine with every triangle at probability zero.
    pub fn new(mesh: MeshTopology, config: EngineConfig) -> Result<Self, ConfigError> {
        let field = ProbabilityField::new(mesh.triangle_count());
        Self::assemble(mesh, field, config)
    }

    /// Create an engine with caller-supplied initial probabilities, one
    /// per triangle. Values are clamped; NaN is rejected.
    pub fn with_probabilities(
        mesh: MeshTopology,
        values: Vec<f32>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        if values.len() != mesh.triangle_count() {
            return Err(ConfigError::FieldSizeMismatch {
                expected: mesh.triangle_count(),
                got: values.len(),
            });
        }
        let field = ProbabilityField::from_values(values)?;
        Self::assemble(mesh, field, config)
    }

    fn assemble(
        mesh: MeshTopology,
        field: ProbabilityField,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.tick_period_secs == 0.0 {
            warn!("tick period is zero; the engine will only step when forced");
        }
        let propagator = Box::new(config.rule()?);
        Ok(Self {
            mesh,
            field,
            observations: ObservationMask::new(),
            propagator,
            config,
            state: EngineState::Idle,
            accumulator: 0.0,
            tick_id: TickId::default(),
        })
    }

    /// Replace the diffusion rule.
    pub fn with_propagator(mut self, propagator: Box<dyn Propagator>) -> Self {
        self.propagator = propagator;
        self
    }

    // ── State machine ──────────────────────────────────────────────

    /// Enable time-driven ticking. Starting from Idle clears the
    /// accumulator; starting an already active engine does nothing.
    pub fn start(&mut self) {
        if self.state == EngineState::Active {
            debug!("start on active engine ignored");
            return;
        }
        self.state = EngineState::Active;
        self.accumulator = 0.0;
        debug!(tick = %self.tick_id, "diffusion started");
    }

    /// Disable time-driven ticking.
    pub fn stop(&mut self) {
        if self.state == EngineState::Idle {
            debug!("stop on idle engine ignored");
            return;
        }
        self.state = EngineState::Idle;
        debug!(tick = %self.tick_id, "diffusion stopped");
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns `true` while time-driven ticking is enabled.
    pub fn is_active(&self) -> bool {
        self.state == EngineState::Active
    }

    // ── Ticking ────────────────────────────────────────────────────

    /// Feed `elapsed_secs` of frame time into the accumulator.
    ///
    /// Runs at most one diffusion step, when the accumulator strictly
    /// exceeds the tick period; the accumulator then keeps the remainder
    /// (`accumulator % period`) so variable frame times do not drift.
    /// Returns `Ok(None)` when Idle, when the period is zero, or when no
    /// step was due. Negative or non-finite `elapsed_secs` counts as zero.
    pub fn advance(&mut self, elapsed_secs: f64) -> Result<Option<TickReport>, StepError> {
        let period = self.config.tick_period_secs;
        if self.state == EngineState::Idle || period == 0.0 {
            return Ok(None);
        }
        if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            self.accumulator += elapsed_secs;
        }
        if self.accumulator <= period {
            return Ok(None);
        }
        self.accumulator %= period;
        self.step().map(Some)
    }

    /// Run exactly one diffusion step now, regardless of state.
    ///
    /// The step reads one frozen snapshot of the field and commits all
    /// deltas at once. If the rule fails, nothing is committed and the
    /// tick counter does not advance.
    pub fn step(&mut self) -> Result<TickReport, StepError> {
        let tick_id = self.tick_id.next();
        let mass_before = self.field.total_mass();
        let mut deltas = vec![0.0f32; self.field.len()];

        let donors = {
            let mut ctx = StepContext::new(
                self.field.as_slice(),
                &mut deltas,
                &self.mesh,
                &self.observations,
                tick_id,
            );
            if let Err(reason) = self.propagator.step(&mut ctx) {
                let name = self.propagator.name().to_string();
                debug!(tick = %tick_id, propagator = %name, error = %reason, "step failed; field untouched");
                return Err(StepError::PropagatorFailed { name, reason });
            }
            ctx.donors()
        };

        if let Err(e) = self.field.apply_deltas(&deltas) {
            debug!(tick = %tick_id, error = %e, "commit rejected; field untouched");
            return Err(e.into());
        }
        self.tick_id = tick_id;

        let report = TickReport {
            tick_id,
            donors,
            observed: self.observations.len(),
            mass_before,
            mass_after: self.field.total_mass(),
        };
        trace!(
            tick = %tick_id,
            donors,
            mass_before,
            mass_after = report.mass_after,
            "diffusion step committed"
        );
        Ok(report)
    }

    // ── Field ──────────────────────────────────────────────────────

    /// Probability of triangle `index`.
    pub fn probability(&self, index: usize) -> Result<f32, FieldError> {
        self.field.get(index)
    }

    /// Set the probability of triangle `index`, clamped to `[0, 1]`.
    pub fn set_probability(&mut self, index: usize, value: f32) -> Result<(), FieldError> {
        self.field.set(index, value)
    }

    /// Broadcast `value` (clamped) to every triangle.
    pub fn set_all(&mut self, value: f32) -> Result<(), FieldError> {
        self.field.set_all(value)
    }

    /// Reset every triangle to maximal uncertainty (`0.5`).
    pub fn reset_probability(&mut self) {
        self.field.reset();
        debug!(value = UNCERTAIN, "probability field reset");
    }

    /// The target was seen at `index`.
    pub fn confirm_present(&mut self, index: usize) -> Result<(), FieldError> {
        self.field.set(index, 1.0)
    }

    /// The target is known not to be at `index`.
    pub fn confirm_absent(&mut self, index: usize) -> Result<(), FieldError> {
        self.field.set(index, 0.0)
    }

    /// Most likely triangle; ties go to the lowest index.
    pub fn argmax(&self) -> Option<usize> {
        self.field.argmax()
    }

    /// The most likely triangle and its centroid, the point a searcher
    /// should head to. `None` for an empty mesh.
    pub fn search_goal(&self) -> Option<(usize, Point3)> {
        let index = self.field.argmax()?;
        let centroid = self.mesh.centroid(index).ok()?;
        Some((index, centroid))
    }

    // ── Mesh ───────────────────────────────────────────────────────

    /// Triangle containing `point` in the X-Z plane.
    pub fn locate(&self, point: Point3) -> Option<usize> {
        self.mesh.locate(point)
    }

    /// Edge neighbours of triangle `index`.
    pub fn neighbours(&self, index: usize) -> Result<&[usize], MeshError> {
        self.mesh.neighbours(index)
    }

    // ── Observations ───────────────────────────────────────────────

    fn check_triangle(&self, index: usize) -> Result<(), FieldError> {
        if index >= self.mesh.triangle_count() {
            return Err(FieldError::IndexOutOfRange {
                index,
                len: self.mesh.triangle_count(),
            });
        }
        Ok(())
    }

    /// Mark triangle `index` as directly observed. Returns `true` if it was
    /// not already marked.
    pub fn mark_observed(&mut self, index: usize) -> Result<bool, FieldError> {
        self.check_triangle(index)?;
        Ok(self.observations.mark(index))
    }

    /// Clear the observed flag of `index`. Returns `true` if it was set.
    pub fn unmark_observed(&mut self, index: usize) -> bool {
        self.observations.unmark(index)
    }

    /// Whether `index` is currently observed.
    pub fn is_observed(&self, index: usize) -> bool {
        self.observations.contains(index)
    }

    /// Forget every observation.
    pub fn clear_observations(&mut self) {
        self.observations.clear();
    }

    /// Replace the whole observation set. Fails without changing the mask
    /// if any index is outside the mesh.
    pub fn replace_observations<I>(&mut self, triangles: I) -> Result<(), FieldError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut mask = ObservationMask::new();
        for index in triangles {
            self.check_triangle(index)?;
            mask.mark(index);
        }
        self.observations = mask;
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The mesh.
    pub fn mesh(&self) -> &MeshTopology {
        &self.mesh
    }

    /// The probability field.
    pub fn field(&self) -> &ProbabilityField {
        &self.field
    }

    /// The observation mask.
    pub fn observations(&self) -> &ObservationMask {
        &self.observations
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Last committed tick; `TickId(0)` before the first step.
    pub fn current_tick(&self) -> TickId {
        self.tick_id
    }

    /// Seconds accumulated toward the next step.
    pub fn accumulated_secs(&self) -> f64 {
        self.accumulator
    }
}

impl std::fmt::Debug for DiffusionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffusionEngine")
            .field("triangles", &self.mesh.triangle_count())
            .field("state", &self.state)
            .field("current_tick", &self.tick_id)
            .field("observed", &self.observations.len())
            .field("propagator", &self.propagator.name())
            .finish()
    }
}
