//! Probmesh: probabilistic target-occupancy diffusion over navigation meshes.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! probmesh sub-crates. For most users, adding `probmesh` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use probmesh::prelude::*;
//!
//! // A unit square split into two triangles.
//! let mesh = MeshTopology::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 0.0, 1.0),
//!         Point3::new(1.0, 0.0, 1.0),
//!     ],
//!     &[0, 1, 2, 1, 3, 2],
//! )
//! .unwrap();
//! let mut engine = DiffusionEngine::new(mesh, EngineConfig::default()).unwrap();
//!
//! // The target was last seen in the lower-left triangle, then vanished.
//! let last_seen = engine.locate(Point3::new(0.2, 0.0, 0.2)).unwrap();
//! engine.confirm_present(last_seen).unwrap();
//! engine.start();
//!
//! // Frames of 0.25 s; the fifth pushes the accumulator past the 1 s period.
//! for _ in 0..5 {
//!     engine.advance(0.25).unwrap();
//! }
//! assert_eq!(engine.current_tick(), TickId(1));
//! assert_eq!(engine.field().as_slice(), &[0.5, 0.5]);
//!
//! let (goal, centre) = engine.search_goal().unwrap();
//! assert_eq!(goal, 0);
//! assert_eq!(engine.locate(centre), Some(0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `probmesh-core` | Probability field, observation mask, IDs, errors |
//! | [`mesh`] | `probmesh-mesh` | Mesh topology, adjacency, point location |
//! | [`propagator`] | `probmesh-propagator` | Propagator trait and step context |
//! | [`propagators`] | `probmesh-propagators` | The occupancy diffusion rule |
//! | [`engine`] | `probmesh-engine` | The tick-driven diffusion engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`probmesh-core`).
///
/// Contains [`types::ProbabilityField`], [`types::ObservationMask`], the
/// [`types::ObservationSource`] capability, and the shared error types.
pub use probmesh_core as types;

/// Triangulated mesh topology (`probmesh-mesh`).
pub use probmesh_mesh as mesh;

/// Propagator trait and step context (`probmesh-propagator`).
///
/// The [`propagator::Propagator`] trait is the extension point for
/// alternative belief-update rules.
pub use probmesh_propagator as propagator;

/// Reference diffusion rule (`probmesh-propagators`).
pub use probmesh_propagators as propagators;

/// The diffusion engine (`probmesh-engine`).
pub use probmesh_engine as engine;

/// Common imports for typical probmesh usage.
///
/// ```rust
/// use probmesh::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use probmesh_core::{
        NoObservations, ObservationMask, ObservationSource, ProbabilityField, TickId,
    };

    // Errors
    pub use probmesh_core::{FieldError, PropagatorError, StepError};
    pub use probmesh_mesh::MeshError;

    // Mesh
    pub use probmesh_mesh::{MeshTopology, Point3};

    // Propagator
    pub use probmesh_propagator::{Propagator, StepContext};
    pub use probmesh_propagators::{OccupancyDiffusion, RuleParameterError};

    // Engine
    pub use probmesh_engine::{ConfigError, DiffusionEngine, EngineConfig, EngineState, TickReport};
}
