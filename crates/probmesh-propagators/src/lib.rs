//! Reference propagators for navigation-mesh occupancy.
//!
//! [`OccupancyDiffusion`] moves probability mass downhill from confident
//! cells into unobserved neighbours, with a sticky floor at maximal
//! uncertainty.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod occupancy_diffusion;

pub use occupancy_diffusion::{
    OccupancyDiffusion, RuleParameterError, MAX_FLOW_FRACTION, MIN_PROPAGATION_THRESHOLD,
    UNCERTAINTY_FLOOR,
};
