//! The merge and materialize phases of a level.
//!
//! Both phases are prefix-sum scatters: the destination offset of every
//! partition is known before any data moves, so each worker writes into its
//! own disjoint slice of the freshly allocated output and no locks are taken.

use tracing::trace;

use crate::{
    concurrency::WorkerPool,
    error::{checked_add, checked_mul, try_filled, EnumerationError, Result},
    partition::{split_mut_by, Partition, PartitionBuffer},
    ragged::Ragged,
    walk::WalkTable,
};

/// Concatenates per-partition buffers into one global CSR relation `C[i]`.
///
/// Partition `p`'s local offsets are biased by the number of values produced
/// by partitions `0..p`, and its values are copied behind theirs. Buffers must
/// be given in partition order.
///
/// # Errors
/// Returns `Allocation` if the merged relation cannot be allocated, or
/// `CapacityOverflow` if the row count leaves no room for the offsets.
pub fn merge_partitions(pool: &WorkerPool, buffers: &[PartitionBuffer]) -> Result<Ragged<usize>> {
    let rows: usize = buffers.iter().map(|b| b.rows.row_count()).sum();
    let nnz: usize = buffers.iter().map(PartitionBuffer::nnz).sum();

    let mut offsets = try_filled(checked_add(rows, 1, "candidate offsets")?, 0usize)?;
    let mut columns = try_filled(nnz, 0usize)?;

    {
        let mut bias = 0;
        let mut tasks = Vec::with_capacity(buffers.len());
        let offset_slices = split_mut_by(&mut offsets[1..], buffers.iter().map(|b| b.rows.row_count()));
        let column_slices = split_mut_by(&mut columns, buffers.iter().map(PartitionBuffer::nnz));
        for ((buffer, off), cols) in buffers.iter().zip(offset_slices).zip(column_slices) {
            tasks.push((buffer, bias, off, cols));
            bias += buffer.nnz();
        }

        pool.fork_join(tasks, |_, (buffer, column_bias, off, cols)| {
            for (dst, &local) in off.iter_mut().zip(&buffer.rows.offsets()[1..]) {
                *dst = local + column_bias;
            }
            cols.copy_from_slice(buffer.rows.values());
        });
    }

    trace!(rows, nnz, partitions = buffers.len(), "merged candidate relation");
    Ragged::from_parts(offsets, columns)
}

/// Builds the next walk table: every candidate `c` of row `w` becomes one new
/// walk holding `w`'s pairs plus `(w.arity, c)`, inserted so the row stays
/// sorted by vertex.
///
/// `partitions` split the rows of `candidates`; each worker writes the walks
/// of its rows into a disjoint output range computed from the candidate
/// offsets.
///
/// # Errors
/// - `DimensionMismatch` if `candidates` and `walks` disagree on row count,
///   or `partitions` do not cover the rows
/// - `CapacityOverflow` / `Allocation` if the new table cannot be sized
pub fn materialize(
    pool: &WorkerPool,
    partitions: &[Partition],
    walks: &WalkTable,
    candidates: &Ragged<usize>,
) -> Result<WalkTable> {
    if candidates.row_count() != walks.row_count() {
        return Err(EnumerationError::DimensionMismatch(format!(
            "{} candidate rows for {} walks",
            candidates.row_count(),
            walks.row_count()
        )));
    }
    if partitions.last().map_or(0, |p| p.hi) != candidates.row_count() {
        return Err(EnumerationError::DimensionMismatch(
            "partitions do not cover the candidate rows".into(),
        ));
    }

    let position = walks.arity();
    let arity = position + 1;
    let total = checked_mul(candidates.len(), arity, "walk table")?;

    let mut vertices = try_filled(total, 0usize)?;
    let mut positions = try_filled(total, 0usize)?;

    {
        let offsets = candidates.offsets();
        let widths = || partitions.iter().map(|p| (offsets[p.hi] - offsets[p.lo]) * arity);
        let vertex_slices = split_mut_by(&mut vertices, widths());
        let position_slices = split_mut_by(&mut positions, widths());
        let tasks: Vec<_> = partitions
            .iter()
            .zip(vertex_slices)
            .zip(position_slices)
            .map(|((p, v), q)| (*p, v, q))
            .collect();

        pool.fork_join(tasks, |_, (partition, vertex_out, position_out)| {
            let mut at = 0;
            for row in partition.range() {
                let walk = walks.walk(row);
                for &c in candidates.row(row) {
                    let split = walk.vertices().partition_point(|&v| v < c);
                    let dst_v = &mut vertex_out[at..at + arity];
                    let dst_p = &mut position_out[at..at + arity];

                    dst_v[..split].copy_from_slice(&walk.vertices()[..split]);
                    dst_p[..split].copy_from_slice(&walk.positions()[..split]);
                    dst_v[split] = c;
                    dst_p[split] = position;
                    dst_v[split + 1..].copy_from_slice(&walk.vertices()[split..]);
                    dst_p[split + 1..].copy_from_slice(&walk.positions()[split..]);

                    at += arity;
                }
            }
            debug_assert_eq!(at, vertex_out.len());
        });
    }

    WalkTable::from_sorted_parts(arity, vertices, positions)
}
