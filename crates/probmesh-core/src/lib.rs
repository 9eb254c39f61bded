//! Core types and traits for probabilistic occupancy over navigation meshes.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! per-triangle [`ProbabilityField`], the [`ObservationMask`] supplied by a
//! visibility subsystem, the [`ObservationSource`] capability the diffusion
//! rule consults, and the error types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;
pub mod mask;
pub mod traits;

pub use error::{FieldError, PropagatorError, StepError};
pub use field::{ProbabilityField, UNCERTAIN};
pub use id::TickId;
pub use mask::{ObservationMask, ObservationMaskIter};
pub use traits::{NoObservations, ObservationSource};
