//! Error types for mesh construction and topology queries.

use std::fmt;

/// Errors arising from mesh construction or indexed queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle index is outside `[0, triangle_count)`.
    IndexOutOfRange {
        /// The offending triangle index.
        index: usize,
        /// Number of triangles in the mesh.
        len: usize,
    },
    /// A triangle references a vertex that does not exist.
    VertexOutOfRange {
        /// Triangle containing the bad reference.
        triangle: usize,
        /// The referenced vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "triangle index {index} out of range [0, {len})")
            }
            Self::VertexOutOfRange {
                triangle,
                vertex,
                vertex_count,
            } => write!(
                f,
                "triangle {triangle} references vertex {vertex}, mesh has {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for MeshError {}
