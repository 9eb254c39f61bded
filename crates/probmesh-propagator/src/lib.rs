//! Propagator trait and step context for navigation-mesh occupancy.
//!
//! A [`Propagator`] computes one tick's worth of probability deltas from a
//! frozen snapshot of the field. The engine owns the commit; propagators
//! never mutate the field directly.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod propagator;

pub use context::StepContext;
pub use propagator::Propagator;
