//! Position-based edge adjacency.
//!
//! Adjacency is derived from shared vertex *positions*, never from shared
//! vertex indices. A triangle `j` neighbours `i` when at least two of `j`'s
//! corners sit on positions that are corners of `i`. One shared corner is
//! not enough: corner-touching triangles are not diffusion paths.
//!
//! [`build_neighbour_lists`] precomputes every list through a
//! position -> corner-occurrence index. [`scan_neighbours`] is the naive
//! two-pass linear scan it must agree with.

use crate::point::Point3;
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

/// Sorted neighbour indices of one triangle.
///
/// Inline capacity 4 covers manifold meshes (at most 3 edge neighbours)
/// with room for one duplicate triangle.
pub type NeighbourList = SmallVec<[usize; 4]>;

/// Hashable identity of a vertex position.
///
/// Two positions are the same iff their coordinates are bitwise equal
/// once `-0.0` is folded into `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([u32; 3]);

impl VertexKey {
    /// Key for a position.
    pub fn of(p: Point3) -> Self {
        fn bits(v: f32) -> u32 {
            if v == 0.0 {
                0
            } else {
                v.to_bits()
            }
        }
        Self([bits(p.x), bits(p.y), bits(p.z)])
    }
}

/// Triangles touching each position, one entry per corner occurrence.
pub(crate) type CornerIndex = IndexMap<VertexKey, SmallVec<[usize; 8]>>;

/// Group corner occurrences by position.
pub(crate) fn build_corner_index(keys: &[[VertexKey; 3]]) -> CornerIndex {
    let mut corners = CornerIndex::new();
    for (triangle, tri) in keys.iter().enumerate() {
        for key in tri {
            corners.entry(*key).or_default().push(triangle);
        }
    }
    corners
}

/// Distinct positions among a triangle's corners, in corner order.
fn distinct_corners(tri: &[VertexKey; 3]) -> SmallVec<[VertexKey; 3]> {
    let mut out = SmallVec::new();
    for key in tri {
        if !out.contains(key) {
            out.push(*key);
        }
    }
    out
}

/// Precompute the neighbour list of every triangle.
pub(crate) fn build_neighbour_lists(
    keys: &[[VertexKey; 3]],
    corners: &CornerIndex,
) -> Vec<NeighbourList> {
    keys.iter()
        .enumerate()
        .map(|(i, tri)| {
            let mut counts: SmallVec<[(usize, u8); 16]> = SmallVec::new();
            for key in distinct_corners(tri) {
                let Some(occurrences) = corners.get(&key) else {
                    continue;
                };
                for &j in occurrences {
                    if j == i {
                        continue;
                    }
                    match counts.iter_mut().find(|(t, _)| *t == j) {
                        Some((_, n)) => *n += 1,
                        None => counts.push((j, 1)),
                    }
                }
            }
            let mut list: NeighbourList = counts
                .into_iter()
                .filter(|&(_, n)| n >= 2)
                .map(|(j, _)| j)
                .collect();
            list.sort_unstable();
            list
        })
        .collect()
}

/// Naive neighbour scan over every corner of every triangle.
///
/// The first matching corner of a triangle flags it as seen once; a second
/// matching corner confirms it as a neighbour.
pub(crate) fn scan_neighbours(keys: &[[VertexKey; 3]], i: usize) -> NeighbourList {
    let target = &keys[i];
    let mut seen_once: IndexSet<usize> = IndexSet::new();
    let mut confirmed = NeighbourList::new();

    for (slot, key) in keys.iter().flatten().enumerate() {
        if !target.contains(key) {
            continue;
        }
        let j = slot / 3;
        if j == i {
            continue;
        }
        if !seen_once.insert(j) && !confirmed.contains(&j) {
            confirmed.push(j);
        }
    }
    confirmed.sort_unstable();
    confirmed
}
