//! Occupancy diffusion engine for navigation meshes.
//!
//! [`DiffusionEngine`] owns one tracked area: the [`MeshTopology`], its
//! [`ProbabilityField`], and the [`ObservationMask`] fed by a visibility
//! subsystem. A host drives it once per frame with
//! [`advance()`](DiffusionEngine::advance); while the engine is
//! [`Active`](EngineState::Active) the accumulated time gates one diffusion
//! step per tick period.
//!
//! [`MeshTopology`]: probmesh_mesh::MeshTopology
//! [`ProbabilityField`]: probmesh_core::ProbabilityField
//! [`ObservationMask`]: probmesh_core::ObservationMask

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod metrics;

pub use config::{ConfigError, EngineConfig};
pub use engine::{DiffusionEngine, EngineState};
pub use metrics::TickReport;
