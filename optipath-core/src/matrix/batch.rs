//! Partition city indices into upstream-sized batches.

use std::num::NonZeroUsize;
use std::ops::Range;

/// One origin batch paired with one destination batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPair {
    /// Position of the origin batch in the partition.
    pub origin_batch: usize,
    /// Position of the destination batch in the partition.
    pub destination_batch: usize,
    /// Global origin indices covered.
    pub origins: Range<usize>,
    /// Global destination indices covered.
    pub destinations: Range<usize>,
}

/// Split `[0, len)` into contiguous ranges of at most `batch_size` indices.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use optipath_core::matrix::partition_batches;
///
/// let size = NonZeroUsize::new(10).expect("non-zero");
/// assert_eq!(partition_batches(23, size), vec![0..10, 10..20, 20..23]);
/// ```
#[must_use]
pub fn partition_batches(len: usize, batch_size: NonZeroUsize) -> Vec<Range<usize>> {
    let size = batch_size.get();
    (0..len)
        .step_by(size)
        .map(|start| start..len.min(start + size))
        .collect()
}

/// Every (origin batch, destination batch) combination, diagonal pairs
/// included, origin-major.
///
/// Yields `ceil(len / batch_size)^2` pairs whose rectangles tile the
/// `len×len` matrix without overlap.
#[must_use]
pub fn batch_pairs(len: usize, batch_size: NonZeroUsize) -> Vec<BatchPair> {
    let ranges = partition_batches(len, batch_size);
    ranges
        .iter()
        .enumerate()
        .flat_map(|(origin_batch, origins)| {
            ranges
                .iter()
                .enumerate()
                .map(move |(destination_batch, destinations)| BatchPair {
                    origin_batch,
                    destination_batch,
                    origins: origins.clone(),
                    destinations: destinations.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn size(value: usize) -> NonZeroUsize {
        NonZeroUsize::new(value).expect("test batch sizes are non-zero")
    }

    #[rstest]
    #[case(2, 10, vec![0..2])]
    #[case(10, 10, vec![0..10])]
    #[case(11, 10, vec![0..10, 10..11])]
    #[case(5, 2, vec![0..2, 2..4, 4..5])]
    #[case(0, 3, vec![])]
    fn partitions_are_contiguous(
        #[case] len: usize,
        #[case] batch: usize,
        #[case] expected: Vec<Range<usize>>,
    ) {
        assert_eq!(partition_batches(len, size(batch)), expected);
    }

    #[rstest]
    #[case(2, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 4)]
    #[case(20, 10, 4)]
    #[case(21, 10, 9)]
    #[case(7, 1, 49)]
    fn pair_count_is_batch_count_squared(
        #[case] len: usize,
        #[case] batch: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(batch_pairs(len, size(batch)).len(), expected);
    }

    #[rstest]
    fn pairs_tile_the_matrix_exactly_once() {
        let len = 13;
        let mut hits = vec![0_u8; len * len];

        for pair in batch_pairs(len, size(4)) {
            for from in pair.origins.clone() {
                for to in pair.destinations.clone() {
                    hits[from * len + to] += 1;
                }
            }
        }

        assert!(hits.iter().all(|&count| count == 1));
    }
}
