//! [`MeshTopology`]: the immutable triangulated surface.

use crate::adjacency::{
    build_corner_index, build_neighbour_lists, scan_neighbours, CornerIndex, NeighbourList,
    VertexKey,
};
use crate::error::MeshError;
use crate::locate::contains_xz;
use crate::point::Point3;
use tracing::{debug, warn};

/// A static triangulated surface with precomputed edge adjacency.
///
/// Triangle `i` spans `indices[3i..3i + 3]`. Trailing indices that do not
/// form a whole triangle are ignored, so the triangle count is always
/// `indices.len() / 3`. Degenerate and duplicate triangles are kept as-is.
///
/// # Examples
///
/// ```
/// use probmesh_mesh::{MeshTopology, Point3};
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
/// ];
/// let mesh = MeshTopology::new(vertices, &[0, 1, 2, 1, 3, 2]).unwrap();
///
/// assert_eq!(mesh.triangle_count(), 2);
/// assert_eq!(mesh.neighbours(0).unwrap(), &[1]);
/// assert_eq!(mesh.locate(Point3::new(0.9, 0.0, 0.9)), Some(1));
/// assert_eq!(mesh.locate(Point3::new(2.0, 0.0, 2.0)), None);
/// ```
#[derive(Clone, Debug)]
pub struct MeshTopology {
    vertices: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
    keys: Vec<[VertexKey; 3]>,
    corners: CornerIndex,
    neighbours: Vec<NeighbourList>,
}

impl MeshTopology {
    /// Build a mesh from a vertex buffer and a flat triangle index buffer.
    ///
    /// Fails if any index references a vertex that does not exist.
    pub fn new(vertices: Vec<Point3>, indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            warn!(
                index_count = indices.len(),
                ignored = indices.len() % 3,
                "index buffer length is not a multiple of 3; ignoring trailing indices"
            );
        }
        let triangles = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::from_triangles(vertices, triangles)
    }

    /// Build a mesh from per-triangle vertex-index triples.
    pub fn from_triangles(
        vertices: Vec<Point3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        let mut keys = Vec::with_capacity(triangles.len());
        for (triangle, tri) in triangles.iter().enumerate() {
            let mut corner_keys = [VertexKey::of(Point3::default()); 3];
            for (slot, &vertex) in tri.iter().enumerate() {
                let p = vertices.get(vertex as usize).ok_or(MeshError::VertexOutOfRange {
                    triangle,
                    vertex,
                    vertex_count: vertices.len(),
                })?;
                corner_keys[slot] = VertexKey::of(*p);
            }
            keys.push(corner_keys);
        }

        let corners = build_corner_index(&keys);
        let neighbours = build_neighbour_lists(&keys, &corners);
        debug!(
            triangles = triangles.len(),
            vertices = vertices.len(),
            positions = corners.len(),
            "built mesh topology"
        );

        Ok(Self {
            vertices,
            triangles,
            keys,
            corners,
            neighbours,
        })
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of entries in the vertex buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct vertex positions referenced by triangles.
    pub fn distinct_positions(&self) -> usize {
        self.corners.len()
    }

    /// Returns `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The vertex buffer.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    fn check(&self, index: usize) -> Result<(), MeshError> {
        if index >= self.triangles.len() {
            return Err(MeshError::IndexOutOfRange {
                index,
                len: self.triangles.len(),
            });
        }
        Ok(())
    }

    /// Vertex-index triple of a triangle.
    pub fn triangle(&self, index: usize) -> Result<[u32; 3], MeshError> {
        self.check(index)?;
        Ok(self.triangles[index])
    }

    /// The three corner points of a triangle, in stored order.
    pub fn vertices_of(&self, index: usize) -> Result<[Point3; 3], MeshError> {
        self.check(index)?;
        Ok(self.corner_points(index))
    }

    // Indices were validated at construction.
    fn corner_points(&self, index: usize) -> [Point3; 3] {
        self.triangles[index].map(|v| self.vertices[v as usize])
    }

    /// Arithmetic mean of a triangle's corners.
    pub fn centroid(&self, index: usize) -> Result<Point3, MeshError> {
        let [a, b, c] = self.vertices_of(index)?;
        Ok((a + b + c) / 3.0)
    }

    /// Triangles sharing an edge (two vertex positions) with `index`,
    /// in ascending order.
    pub fn neighbours(&self, index: usize) -> Result<&[usize], MeshError> {
        self.check(index)?;
        Ok(&self.neighbours[index])
    }

    /// Neighbours computed by a full linear scan of the index buffer.
    ///
    /// Always equal to [`neighbours`](Self::neighbours); kept as the
    /// reference the precomputed lists are checked against.
    pub fn neighbours_by_scan(&self, index: usize) -> Result<NeighbourList, MeshError> {
        self.check(index)?;
        Ok(scan_neighbours(&self.keys, index))
    }

    /// Largest neighbour count over all triangles.
    pub fn max_neighbour_degree(&self) -> usize {
        self.neighbours.iter().map(|n| n.len()).max().unwrap_or(0)
    }

    /// The first triangle, in storage order, whose X-Z projection contains
    /// `point`. Returns `None` for points outside the mesh footprint.
    ///
    /// Boundaries are inclusive, so a point on an edge shared by two
    /// triangles resolves to the lower index.
    pub fn locate(&self, point: Point3) -> Option<usize> {
        (0..self.triangles.len()).find(|&i| contains_xz(&self.corner_points(i), point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    // Local copies of the `probmesh-test-utils` layouts. That crate depends
    // on this one, so from inside these unit tests its fixtures would build
    // a second, incompatible `MeshTopology`.
    fn quad_pair() -> MeshTopology {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        MeshTopology::new(vertices, &[0, 1, 2, 1, 3, 2]).unwrap()
    }

    /// `rows x cols` unit squares, two triangles each. With `shared` false
    /// every triangle gets its own three vertices.
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
        MeshTopology::new(vertices, &indices).unwrap()
    }

    #[test]
    fn quad_pair_adjacency() {
        let mesh = quad_pair();
        assert_eq!(mesh.neighbours(0).unwrap(), &[1]);
        assert_eq!(mesh.neighbours(1).unwrap(), &[0]);
        assert_eq!(mesh.distinct_positions(), 4);
    }

    #[test]
    fn corner_touch_is_not_adjacency() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, -1.0),
        ];
        // Triangle 1 touches triangle 0 only at (1, 0, 0).
        let mesh = MeshTopology::new(vertices, &[0, 1, 2, 1, 3, 4]).unwrap();
        assert!(mesh.neighbours(0).unwrap().is_empty());
        assert!(mesh.neighbours(1).unwrap().is_empty());
    }

    #[test]
    fn coincident_vertices_connect_independently_indexed_triangles() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = MeshTopology::new(vertices, &[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(mesh.neighbours(0).unwrap(), &[1]);
        assert_eq!(mesh.neighbours(1).unwrap(), &[0]);
    }

    #[test]
    fn duplicate_triangles_are_neighbours() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = MeshTopology::new(vertices, &[0, 1, 2, 2, 1, 0]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.neighbours(0).unwrap(), &[1]);
    }

    #[test]
    fn out_of_range_queries_fail() {
        let mesh = quad_pair();
        let err = MeshError::IndexOutOfRange { index: 2, len: 2 };
        assert_eq!(mesh.neighbours(2), Err(err.clone()));
        assert_eq!(mesh.vertices_of(2), Err(err.clone()));
        assert_eq!(mesh.centroid(2), Err(err.clone()));
        assert_eq!(mesh.neighbours_by_scan(2), Err(err));
    }

    #[test]
    fn bad_vertex_reference_is_rejected() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let err = MeshTopology::new(vertices, &[0, 1, 7]).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexOutOfRange {
                triangle: 0,
                vertex: 7,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn trailing_indices_are_ignored() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ];
        let mesh = MeshTopology::new(vertices, &[0, 1, 2, 1, 3]).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = MeshTopology::new(Vec::new(), &[]).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.locate(Point3::default()), None);
        assert_eq!(mesh.max_neighbour_degree(), 0);
        assert!(mesh.neighbours(0).is_err());
    }

    #[test]
    fn vertices_of_keeps_stored_order() {
        let mesh = quad_pair();
        let [a, b, c] = mesh.vertices_of(1).unwrap();
        assert_eq!(a, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(b, Point3::new(1.0, 0.0, 1.0));
        assert_eq!(c, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.triangle(1).unwrap(), [1, 3, 2]);
    }

    #[test]
    fn centroid_is_corner_mean() {
        let mesh = quad_pair();
        let c = mesh.centroid(0).unwrap();
        assert!((c.x - 1.0 / 3.0).abs() < 1e-6);
        assert!((c.z - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(mesh.locate(c), Some(0));
    }

    #[test]
    fn shared_edge_resolves_to_lower_index() {
        let mesh = quad_pair();
        let on_edge = Point3::new(0.5, 0.0, 0.5);
        for _ in 0..3 {
            assert_eq!(mesh.locate(on_edge), Some(0));
        }
    }

    #[test]
    fn grid_interior_has_three_neighbours() {
        let mesh = grid(3, 3, true);
        assert_eq!(mesh.triangle_count(), 18);
        assert_eq!(mesh.max_neighbour_degree(), 3);
        // Lower triangle of the centre square.
        assert_eq!(mesh.neighbours(8).unwrap(), &[3, 7, 9]);
    }

    #[test]
    fn shared_and_unshared_grids_agree() {
        let a = grid(4, 5, true);
        let b = grid(4, 5, false);
        assert_eq!(a.distinct_positions(), b.distinct_positions());
        for i in 0..a.triangle_count() {
            assert_eq!(a.neighbours(i).unwrap(), b.neighbours(i).unwrap());
        }
    }

    #[test]
    fn compliance_grids() {
        compliance::run_full_compliance(&grid(4, 4, true));
        compliance::run_full_compliance(&grid(3, 6, false));
        compliance::run_full_compliance(&quad_pair());
    }

    proptest! {
        #[test]
        fn index_matches_scan(rows in 1u32..6, cols in 1u32..6, shared in any::<bool>()) {
            let mesh = grid(rows, cols, shared);
            for i in 0..mesh.triangle_count() {
                let scanned = mesh.neighbours_by_scan(i).unwrap();
                prop_assert_eq!(mesh.neighbours(i).unwrap(), scanned.as_slice());
            }
        }

        #[test]
        fn neighbours_symmetric(rows in 1u32..6, cols in 1u32..6, shared in any::<bool>()) {
            let mesh = grid(rows, cols, shared);
            for i in 0..mesh.triangle_count() {
                for &j in mesh.neighbours(i).unwrap() {
                    prop_assert!(
                        mesh.neighbours(j).unwrap().contains(&i),
                        "{} in N({}) but {} not in N({})", j, i, i, j,
                    );
                }
            }
        }

        #[test]
        fn grid_points_locate_to_their_square(
            rows in 1u32..6,
            cols in 1u32..6,
            fx in 0.01f32..0.99,
            fz in 0.01f32..0.99,
            r in 0u32..6,
            c in 0u32..6,
        ) {
            let mesh = grid(rows, cols, true);
            let (r, c) = (r % rows, c % cols);
            let p = Point3::new(c as f32 + fx, 0.0, r as f32 + fz);
            let square = ((r * cols + c) * 2) as usize;
            let found = mesh.locate(p);
            prop_assert!(found == Some(square) || found == Some(square + 1), "{:?}", found);
        }

        #[test]
        fn outside_footprint_is_none(rows in 1u32..6, cols in 1u32..6, dx in 0.1f32..10.0) {
            let mesh = grid(rows, cols, true);
            prop_assert_eq!(mesh.locate(Point3::new(cols as f32 + dx, 0.0, 0.5)), None);
            prop_assert_eq!(mesh.locate(Point3::new(-dx, 0.0, 0.5)), None);
        }
    }
}
