//! Triangulated navigation-mesh topology.
//!
//! [`MeshTopology`] turns raw vertex and index buffers into a queryable
//! graph: which triangles share an edge with a given triangle, and which
//! triangle contains a given point.
//!
//! # Adjacency
//!
//! Two triangles are neighbours when they share at least two vertex
//! *positions*. Positions are compared structurally, so independently
//! indexed but coincident vertices still connect triangles, while
//! triangles that only touch at a corner do not.
//!
//! # Point location
//!
//! [`MeshTopology::locate`] tests containment in the X-Z plane and returns
//! the first matching triangle in storage order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod error;
pub mod locate;
pub mod point;
pub mod topology;

#[cfg(test)]
pub(crate) mod compliance;

pub use adjacency::{NeighbourList, VertexKey};
pub use error::MeshError;
pub use point::Point3;
pub use topology::MeshTopology;
