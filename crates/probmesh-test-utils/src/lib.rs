//! Test utilities for probmesh development.
//!
//! Provides reusable [`MeshTopology`] fixtures with known adjacency and a
//! set of mock propagators (see [`fixtures`]) for engine testing.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use probmesh_mesh::{MeshTopology, Point3};

fn build(vertices: Vec<Point3>, indices: &[u32]) -> MeshTopology {
    match MeshTopology::new(vertices, indices) {
        Ok(mesh) => mesh,
        Err(e) => panic!("fixture mesh is invalid: {e}"),
    }
}

/// A unit square split along its diagonal: `N(0) = [1]`, `N(1) = [0]`.
pub fn quad_pair() -> MeshTopology {
    build(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ],
        &[0, 1, 2, 1, 3, 2],
    )
}

/// Two triangles meeting at a single corner. Neither is a neighbour of
/// the other.
pub fn corner_touch_pair() -> MeshTopology {
    build(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, -1.0),
        ],
        &[0, 1, 2, 1, 3, 4],
    )
}

/// `n` triangles fanned around a hub over a half disc. Consecutive
/// triangles share a spoke, so the adjacency is the path `0 - 1 - ... - n-1`.
pub fn triangle_fan(n: u32) -> MeshTopology {
    let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
    for k in 0..=n {
        let a = k as f32 / n.max(1) as f32 * std::f32::consts::PI;
        vertices.push(Point3::new(a.cos(), 0.0, a.sin()));
    }
    let indices: Vec<u32> = (0..n).flat_map(|k| [0, 1 + k, 2 + k]).collect();
    build(vertices, &indices)
}

/// `rows x cols` unit squares in the X-Z plane, two triangles per square.
///
/// Square `(r, c)` owns triangles `2 (r * cols + c)` (lower, touching the
/// square's origin corner) and `2 (r * cols + c) + 1` (upper). Vertices
/// are shared between squares.
pub fn grid_mesh(rows: u32, cols: u32) -> MeshTopology {
    grid(rows, cols, true)
}

/// Same layout as [`grid_mesh`], but every triangle has its own three
/// vertices. Adjacency must still come out identical.
pub fn grid_mesh_unshared(rows: u32, cols: u32) -> MeshTopology {
    grid(rows, cols, false)
}

fn grid(rows: u32, cols: u32, shared: bool) -> MeshTopology {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    if shared {
        for r in 0..=rows {
            for c in 0..=cols {
                vertices.push(Point3::new(c as f32, 0.0, r as f32));
            }
        }
    }
    let at = |r: u32, c: u32| r * (cols + 1) + c;
    for r in 0..rows {
        for c in 0..cols {
            let quad = [(r, c), (r, c + 1), (r + 1, c), (r + 1, c + 1)];
            for tri in [[0usize, 1, 2], [1, 3, 2]] {
                for k in tri {
                    let (vr, vc) = quad[k];
                    if shared {
                        indices.push(at(vr, vc));
                    } else {
                        indices.push(vertices.len() as u32);
                        vertices.push(Point3::new(vc as f32, 0.0, vr as f32));
                    }
                }
            }
        }
    }
    build(vertices, &indices)
}

/// Centre of square `(r, c)` in a [`grid_mesh`], on its diagonal.
pub fn grid_square_centre(r: u32, c: u32) -> Point3 {
    Point3::new(c as f32 + 0.5, 0.0, r as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_is_a_path() {
        let mesh = triangle_fan(4);
        assert_eq!(mesh.neighbours(0).unwrap(), &[1]);
        assert_eq!(mesh.neighbours(1).unwrap(), &[0, 2]);
        assert_eq!(mesh.neighbours(3).unwrap(), &[2]);
    }

    #[test]
    fn grids_agree() {
        let a = grid_mesh(2, 3);
        let b = grid_mesh_unshared(2, 3);
        assert_eq!(a.triangle_count(), 12);
        for i in 0..a.triangle_count() {
            assert_eq!(a.neighbours(i).unwrap(), b.neighbours(i).unwrap());
        }
    }

    #[test]
    fn square_centre_locates_to_lower_triangle() {
        let mesh = grid_mesh(3, 3);
        assert_eq!(mesh.locate(grid_square_centre(1, 2)), Some(10));
    }
}
