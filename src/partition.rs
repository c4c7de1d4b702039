//! Enumeration of every ordered split of an identifier length
//!
//! Two stages:
//! 1. [`partitions`] generates each integer partition once, as a
//!    non-increasing sequence.
//! 2. [`distinct_orderings`] expands one partition into every distinct
//!    permutation of its parts. Repeated parts (e.g. `{3, 3}`) must not
//!    produce repeated orderings.
//!
//! [`all_splits`] chains the two and deduplicates across partitions.

use crate::error::{Result, SplitError};
use crate::split::Split;
use std::collections::BTreeSet;

/// Every partition of `n` as a non-increasing sequence of positive parts
///
/// `partitions(0)` is `[[]]`.
///
/// # Example
/// ```
/// use id_splits::partition::partitions;
///
/// assert_eq!(partitions(3), vec![vec![3], vec![2, 1], vec![1, 1, 1]]);
/// ```
pub fn partitions(n: usize) -> Vec<Vec<usize>> {
    partitions_bounded(n, n)
}

fn partitions_bounded(n: usize, max_part: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    (1..=max_part.min(n))
        .rev()
        .flat_map(|first| {
            partitions_bounded(n - first, first)
                .into_iter()
                .map(move |rest| {
                    let mut parts = Vec::with_capacity(rest.len() + 1);
                    parts.push(first);
                    parts.extend(rest);
                    parts
                })
        })
        .collect()
}

/// Every distinct ordering of `parts`, in lexicographic order
///
/// Walks lexicographic permutations from the sorted sequence, which visits
/// each distinct ordering exactly once even when parts repeat.
pub fn distinct_orderings(parts: &[usize]) -> BTreeSet<Vec<usize>> {
    let mut current = parts.to_vec();
    current.sort_unstable();

    let mut orderings = BTreeSet::new();
    loop {
        orderings.insert(current.clone());
        if !next_permutation(&mut current) {
            break;
        }
    }
    orderings
}

/// Advance to the next lexicographic permutation; false once the last is reached
fn next_permutation(seq: &mut [usize]) -> bool {
    if seq.len() < 2 {
        return false;
    }
    let mut i = seq.len() - 1;
    while i > 0 && seq[i - 1] >= seq[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let pivot = i - 1;
    let mut j = seq.len() - 1;
    while seq[j] <= seq[pivot] {
        j -= 1;
    }
    seq.swap(pivot, j);
    seq[i..].reverse();
    true
}

/// Every ordered split of `id_size`, deduplicated, in lexicographic order
///
/// There are `2^(id_size - 1)` of them. Callers shuffle before timing.
pub fn all_splits(id_size: usize) -> Result<Vec<Split>> {
    if id_size == 0 {
        return Err(SplitError::InvalidSplit(
            "id_size must be >= 1, a split summing to 0 has no levels".to_string(),
        ));
    }

    let unique: BTreeSet<Vec<usize>> = partitions(id_size)
        .iter()
        .flat_map(|p| distinct_orderings(p))
        .collect();

    tracing::debug!(id_size, splits = unique.len(), "enumerated splits");
    unique.into_iter().map(Split::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitions_of_zero_is_empty_sequence() {
        assert_eq!(partitions(0), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_partitions_are_canonical() {
        let parts = partitions(5);
        assert_eq!(parts.len(), 7);
        for p in &parts {
            assert!(p.windows(2).all(|w| w[0] >= w[1]), "{:?} not non-increasing", p);
            assert_eq!(p.iter().sum::<usize>(), 5);
        }
    }

    #[test]
    fn test_repeated_parts_collapse() {
        let orderings = distinct_orderings(&[3, 3]);
        assert_eq!(orderings.len(), 1);
        assert!(orderings.contains(&vec![3, 3]));

        let orderings = distinct_orderings(&[2, 1]);
        assert_eq!(orderings.len(), 2);
        assert!(orderings.contains(&vec![2, 1]));
        assert!(orderings.contains(&vec![1, 2]));

        // 4! / (2! * 2!) = 6
        assert_eq!(distinct_orderings(&[2, 2, 1, 1]).len(), 6);
    }

    #[test]
    fn test_all_splits_of_four() {
        let splits = all_splits(4).unwrap();
        let got: BTreeSet<Vec<usize>> = splits.into_iter().map(Vec::from).collect();
        let expected: BTreeSet<Vec<usize>> = [
            vec![4],
            vec![3, 1],
            vec![1, 3],
            vec![2, 2],
            vec![2, 1, 1],
            vec![1, 2, 1],
            vec![1, 1, 2],
            vec![1, 1, 1, 1],
        ]
        .into_iter()
        .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_all_splits_of_six_count() {
        assert_eq!(all_splits(6).unwrap().len(), 32);
    }

    #[test]
    fn test_all_splits_rejects_zero() {
        assert!(all_splits(0).is_err());
    }
}
