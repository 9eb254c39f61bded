//! The [`ObservationMask`] bitset of currently observed triangles.

use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::traits::ObservationSource;

/// The set of triangle indices a visibility subsystem currently sees.
///
/// Membership only: no duration, no strength. Marking and unmarking are
/// idempotent. Indices below [`DENSE_LIMIT`](Self::DENSE_LIMIT) live in a
/// growable bitset; the rest go to a sorted sparse set, so a stray
/// huge index costs one node rather than a bitset sized to reach it.
#[derive(Clone, Debug, Default)]
pub struct ObservationMask {
    bits: Vec<u64>,
    sparse: BTreeSet<usize>,
}

impl ObservationMask {
    const BITS_PER_WORD: usize = 64;

    /// Indices from here up are stored sparsely.
    pub const DENSE_LIMIT: usize = 1 << 20;

    /// Create an empty mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a triangle as observed. Returns `true` if it was not already marked.
    pub fn mark(&mut self, triangle: usize) -> bool {
        if triangle >= Self::DENSE_LIMIT {
            return self.sparse.insert(triangle);
        }
        let word = triangle / Self::BITS_PER_WORD;
        let bit = triangle % Self::BITS_PER_WORD;
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
        let was_set = self.bits[word] & (1u64 << bit) != 0;
        self.bits[word] |= 1u64 << bit;
        !was_set
    }

    /// Unmark a triangle. Returns `true` if it was marked before.
    pub fn unmark(&mut self, triangle: usize) -> bool {
        if triangle >= Self::DENSE_LIMIT {
            return self.sparse.remove(&triangle);
        }
        let word = triangle / Self::BITS_PER_WORD;
        let bit = triangle % Self::BITS_PER_WORD;
        let Some(w) = self.bits.get_mut(word) else {
            return false;
        };
        let was_set = *w & (1u64 << bit) != 0;
        *w &= !(1u64 << bit);
        while self.bits.last() == Some(&0) {
            self.bits.pop();
        }
        was_set
    }

    /// Check whether a triangle is marked.
    pub fn contains(&self, triangle: usize) -> bool {
        if triangle >= Self::DENSE_LIMIT {
            return self.sparse.contains(&triangle);
        }
        let word = triangle / Self::BITS_PER_WORD;
        let bit = triangle % Self::BITS_PER_WORD;
        word < self.bits.len() && (self.bits[word] & (1u64 << bit)) != 0
    }

    /// Remove every mark.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.sparse.clear();
    }

    /// Returns `true` if nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.sparse.is_empty() && self.bits.iter().all(|&w| w == 0)
    }

    /// Number of marked triangles.
    pub fn len(&self) -> usize {
        let dense: usize = self.bits.iter().map(|w| w.count_ones() as usize).sum();
        dense + self.sparse.len()
    }

    /// Iterate over marked triangles in ascending order.
    pub fn iter(&self) -> ObservationMaskIter<'_> {
        ObservationMaskIter {
            bits: &self.bits,
            word_idx: 0,
            bit_idx: 0,
            sparse: self.sparse.iter(),
        }
    }
}

impl PartialEq for ObservationMask {
    fn eq(&self, other: &Self) -> bool {
        let max_len = self.bits.len().max(other.bits.len());
        self.sparse == other.sparse
            && (0..max_len).all(|i| {
                self.bits.get(i).copied().unwrap_or(0) == other.bits.get(i).copied().unwrap_or(0)
            })
    }
}

impl Eq for ObservationMask {}

impl FromIterator<usize> for ObservationMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Self::new();
        for triangle in iter {
            mask.mark(triangle);
        }
        mask
    }
}

impl Extend<usize> for ObservationMask {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for triangle in iter {
            self.mark(triangle);
        }
    }
}

impl<'a> IntoIterator for &'a ObservationMask {
    type Item = usize;
    type IntoIter = ObservationMaskIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ObservationSource for ObservationMask {
    fn is_observed(&self, triangle: usize) -> bool {
        self.contains(triangle)
    }
}

/// Iterator over marked triangles in an [`ObservationMask`], ascending.
pub struct ObservationMaskIter<'a> {
    bits: &'a [u64],
    word_idx: usize,
    bit_idx: usize,
    sparse: btree_set::Iter<'a, usize>,
}

impl Iterator for ObservationMaskIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.bits.len() {
            let word = self.bits[self.word_idx];
            while self.bit_idx < 64 {
                let bit = self.bit_idx;
                self.bit_idx += 1;
                if word & (1u64 << bit) != 0 {
                    return Some(self.word_idx * 64 + bit);
                }
            }
            self.word_idx += 1;
            self.bit_idx = 0;
        }
        // Every sparse index is above every dense one.
        self.sparse.next().copied()
    }
}
