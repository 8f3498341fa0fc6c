//! Tests for partitioning and the map phase.

use super::*;

#[test]
fn test_first_partition_absorbs_remainder() {
    let parts = partition_rows(10, 4);
    assert_eq!(
        parts,
        vec![
            Partition { lo: 0, hi: 4 },
            Partition { lo: 4, hi: 6 },
            Partition { lo: 6, hi: 8 },
            Partition { lo: 8, hi: 10 },
        ]
    );
}

#[test]
fn test_more_parts_than_rows() {
    let parts = partition_rows(3, 5);
    assert_eq!(parts.len(), 5);
    assert_eq!(parts[0], Partition { lo: 0, hi: 3 });
    assert!(parts[1..].iter().all(|p| p.is_empty() && p.lo == 3));
}

#[test]
fn test_zero_rows_and_zero_parts() {
    let parts = partition_rows(0, 3);
    assert!(parts.iter().all(Partition::is_empty));

    let single = partition_rows(7, 0);
    assert_eq!(single, vec![Partition { lo: 0, hi: 7 }]);
}

#[test]
fn test_partitions_cover_rows_contiguously() {
    for rows in 0..40 {
        for parts in 1..9 {
            let ps = partition_rows(rows, parts);
            assert_eq!(ps.len(), parts);
            assert_eq!(ps[0].lo, 0);
            assert_eq!(ps[parts - 1].hi, rows);
            for w in ps.windows(2) {
                assert_eq!(w[0].hi, w[1].lo);
            }
        }
    }
}

#[test]
fn test_map_partitions_keeps_row_order() {
    let pool = WorkerPool::new(3).unwrap();
    let parts = partition_rows(7, 3);
    let buffers = map_partitions(&pool, &parts, |row, calls: &mut usize, out| {
        *calls += 1;
        out.extend(0..row % 3);
        out.push(row * 100 + *calls);
        Ok(())
    })
    .unwrap();

    assert_eq!(buffers.len(), 3);
    assert_eq!(buffers[0].partition, Partition { lo: 0, hi: 3 });
    // rows 0, 1, 2 with per-worker call counters 1, 2, 3
    assert_eq!(buffers[0].rows.offsets(), &[0, 1, 3, 6]);
    assert_eq!(buffers[0].rows.values(), &[1, 0, 102, 0, 1, 203]);
    // rows 3, 4 on a fresh scratch
    assert_eq!(buffers[1].rows.row(0), &[301]);
    assert_eq!(buffers[1].rows.row(1), &[0, 402]);
    assert_eq!(buffers.iter().map(PartitionBuffer::nnz).sum::<usize>(), 1 + 2 + 3 + 1 + 2 + 3 + 1);
}

#[test]
fn test_map_partitions_propagates_errors() {
    let pool = WorkerPool::new(2).unwrap();
    let parts = partition_rows(4, 2);
    let result = map_partitions(&pool, &parts, |row, _: &mut (), _out| {
        if row == 3 {
            Err(crate::error::EnumerationError::CapacityOverflow { what: "test" })
        } else {
            Ok(())
        }
    });
    assert!(result.is_err());
}

#[test]
fn test_split_mut_by() {
    let mut data: Vec<usize> = (0..6).collect();
    let pieces = split_mut_by(&mut data, [1, 0, 3, 2]);
    assert_eq!(pieces.len(), 4);
    assert_eq!(pieces[0], &[0]);
    assert!(pieces[1].is_empty());
    assert_eq!(pieces[2], &[1, 2, 3]);
    assert_eq!(pieces[3], &[4, 5]);
}
