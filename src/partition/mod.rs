//! Row-range partitioning and the parallel map phase.
//!
//! A table of `m` rows is cut into `parts` contiguous half-open ranges of
//! `m / parts` rows each; the first range also absorbs the `m % parts`
//! remainder. Every range is mapped by exactly one worker into its own
//! private [`PartitionBuffer`], so the map phase shares nothing mutable.

use core::ops::Range;

use tracing::trace;

use crate::{concurrency::WorkerPool, error::Result, ragged::Ragged};

/// A contiguous half-open row range `[lo, hi)` owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    /// First row (inclusive).
    pub lo: usize,
    /// One past the last row.
    pub hi: usize,
}

impl Partition {
    /// Number of rows in the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// Returns `true` if the range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// The range as `lo..hi`.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.lo..self.hi
    }
}

/// Splits `rows` rows into `parts` contiguous ranges (`parts` is clamped to at
/// least one). Always returns exactly `parts` ranges, some possibly empty.
pub fn partition_rows(rows: usize, parts: usize) -> Vec<Partition> {
    let parts = parts.max(1);
    let size = rows / parts;
    let first = size + rows % parts;

    let mut out = Vec::with_capacity(parts);
    out.push(Partition { lo: 0, hi: first });
    let mut lo = first;
    for _ in 1..parts {
        out.push(Partition { lo, hi: lo + size });
        lo += size;
    }
    debug_assert_eq!(lo, rows);
    out
}

/// One worker's output: a local CSR relation whose row `r` holds the values
/// produced for global row `partition.lo + r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionBuffer {
    /// The global row range this buffer covers.
    pub partition: Partition,
    /// Local row offsets (starting at `0`) and concatenated values.
    pub rows: Ragged<usize>,
}

impl PartitionBuffer {
    /// Number of values produced by this partition.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }
}

/// The parallel map phase.
///
/// Runs `transform(row, scratch, out)` for every row of every partition, in
/// row order within a partition. `transform` appends the row's values to
/// `out`; `scratch` is private to the worker and created with `S::default()`.
///
/// # Errors
/// Returns the first error any worker reported (by partition order); all
/// buffers are dropped in that case.
pub fn map_partitions<S, F>(
    pool: &WorkerPool,
    partitions: &[Partition],
    transform: F,
) -> Result<Vec<PartitionBuffer>>
where
    S: Default,
    F: Fn(usize, &mut S, &mut Vec<usize>) -> Result<()> + Sync,
{
    pool.fork_join(partitions.to_vec(), |tid, partition| -> Result<PartitionBuffer> {
        let mut scratch = S::default();
        let mut rows = Ragged::try_with_capacity(partition.len(), partition.len())?;
        for row in partition.range() {
            rows.try_push_row_with(|out| transform(row, &mut scratch, out))?;
        }
        trace!(
            partition = tid,
            lo = partition.lo,
            hi = partition.hi,
            nnz = rows.len(),
            "mapped partition"
        );
        Ok(PartitionBuffer { partition, rows })
    })
    .into_iter()
    .collect()
}

/// Cuts `slice` into consecutive disjoint pieces of the given lengths.
///
/// # Panics
/// Panics if the lengths sum to more than `slice.len()`.
pub(crate) fn split_mut_by<'a, T, I>(mut slice: &'a mut [T], lengths: I) -> Vec<&'a mut [T]>
where
    I: IntoIterator<Item = usize>,
{
    let lengths = lengths.into_iter();
    let mut out = Vec::with_capacity(lengths.size_hint().0);
    for len in lengths {
        let (head, tail) = core::mem::take(&mut slice).split_at_mut(len);
        out.push(head);
        slice = tail;
    }
    out
}

#[cfg(test)]
mod tests;
