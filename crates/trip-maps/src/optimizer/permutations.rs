//! Lazy permutation enumeration
//!
//! Orderings come out in the same order as the classic recursive
//! "each element as head, then permute the rest" construction, which is
//! lexicographic order over element positions. The iterator walks that order
//! with the next-permutation step over an index vector, so nothing recurses
//! and nothing beyond the current ordering is held in memory.

use std::iter::FusedIterator;

/// Iterator over all orderings of a slice
///
/// Finite and non-restartable. An empty slice yields exactly one empty
/// ordering.
#[derive(Debug, Clone)]
pub struct Permutations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    exhausted: bool,
}

/// Enumerate every ordering of `items`
pub fn permutations<T: Clone>(items: &[T]) -> Permutations<'_, T> {
    Permutations {
        items,
        indices: (0..items.len()).collect(),
        exhausted: false,
    }
}

/// `n!`, saturating at `u64::MAX`
pub fn permutation_count(n: usize) -> u64 {
    (1..=n as u64).fold(1u64, u64::saturating_mul)
}

impl<T> Permutations<'_, T> {
    fn advance(&mut self) {
        let n = self.indices.len();

        // Rightmost position whose successor is larger
        let Some(pivot) = (0..n.saturating_sub(1))
            .rev()
            .find(|&i| self.indices[i] < self.indices[i + 1])
        else {
            self.exhausted = true;
            return;
        };

        // Rightmost position after the pivot holding a larger index
        let successor = (pivot + 1..n)
            .rev()
            .find(|&j| self.indices[j] > self.indices[pivot])
            .unwrap_or(pivot + 1);

        self.indices.swap(pivot, successor);
        self.indices[pivot + 1..].reverse();
    }
}

impl<T: Clone> Iterator for Permutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let current = self
            .indices
            .iter()
            .map(|&i| self.items[i].clone())
            .collect();
        self.advance();
        Some(current)
    }
}

impl<T: Clone> FusedIterator for Permutations<'_, T> {}
