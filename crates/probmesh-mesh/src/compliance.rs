//! Topology contract test helpers.
//!
//! These functions verify that a [`MeshTopology`] satisfies the invariants
//! the diffusion rule relies on. Reused across the topology test modules.

use crate::topology::MeshTopology;
use indexmap::IndexSet;

/// Assert that `j in neighbours(i)` implies `i in neighbours(j)`.
pub fn assert_neighbours_symmetric(mesh: &MeshTopology) {
    for i in 0..mesh.triangle_count() {
        for &j in mesh.neighbours(i).unwrap() {
            assert!(
                mesh.neighbours(j).unwrap().contains(&i),
                "neighbour symmetry violated: {j} in N({i}) but {i} not in N({j})"
            );
        }
    }
}

/// Assert that no triangle lists itself and no list has duplicates.
pub fn assert_neighbour_lists_well_formed(mesh: &MeshTopology) {
    for i in 0..mesh.triangle_count() {
        let list = mesh.neighbours(i).unwrap();
        assert!(!list.contains(&i), "triangle {i} lists itself");
        let unique: IndexSet<_> = list.iter().collect();
        assert_eq!(unique.len(), list.len(), "N({i}) has duplicates: {list:?}");
        assert!(
            list.windows(2).all(|w| w[0] < w[1]),
            "N({i}) is not ascending: {list:?}"
        );
    }
}

/// Assert that the precomputed lists equal the naive scan.
pub fn assert_index_matches_scan(mesh: &MeshTopology) {
    for i in 0..mesh.triangle_count() {
        let scanned = mesh.neighbours_by_scan(i).unwrap();
        assert_eq!(
            mesh.neighbours(i).unwrap(),
            scanned.as_slice(),
            "precomputed N({i}) differs from scan"
        );
    }
}

/// Assert that each neighbour shares at least two corner positions.
pub fn assert_neighbours_share_an_edge(mesh: &MeshTopology) {
    for i in 0..mesh.triangle_count() {
        let corners = mesh.vertices_of(i).unwrap();
        for &j in mesh.neighbours(i).unwrap() {
            let shared = mesh
                .vertices_of(j)
                .unwrap()
                .iter()
                .filter(|p| corners.contains(p))
                .count();
            assert!(shared >= 2, "{j} in N({i}) but shares {shared} corner(s)");
        }
    }
}

/// Assert that every non-degenerate triangle's centroid locates to a
/// triangle that contains it (itself, or an earlier overlapping one).
pub fn assert_centroids_locate(mesh: &MeshTopology) {
    for i in 0..mesh.triangle_count() {
        let c = mesh.centroid(i).unwrap();
        let found = mesh.locate(c);
        assert!(
            matches!(found, Some(t) if t <= i),
            "centroid of {i} located to {found:?}"
        );
    }
}

/// Run all compliance checks on a mesh.
pub fn run_full_compliance(mesh: &MeshTopology) {
    assert_neighbours_symmetric(mesh);
    assert_neighbour_lists_well_formed(mesh);
    assert_index_matches_scan(mesh);
    assert_neighbours_share_an_edge(mesh);
    assert_centroids_locate(mesh);
}
