//! Tests for the merge-join and candidate generation.

use super::*;
use crate::{ragged::Ragged, walk::WalkTable};

fn seeds(width: usize, values: Vec<usize>) -> WalkTable {
    WalkTable::from_seeds(&Ragged::from_uniform(width, values).unwrap()).unwrap()
}

fn generate_all(
    graph: &Adjacency,
    required: &[usize],
    table: &WalkTable,
    mask_mode: MaskMode,
    strategy: CandidateStrategy,
) -> Vec<Vec<usize>> {
    let generator = CandidateGenerator::new(graph, required, mask_mode, strategy).unwrap();
    let mut scratch = Scratch::new();
    table
        .walks()
        .map(|walk| {
            let mut out = Vec::new();
            generator.generate(walk, &mut scratch, &mut out).unwrap();
            out
        })
        .collect()
}

#[test]
fn test_merge_join_retain() {
    let mut out = Vec::new();
    merge_join(&[1, 3, 5, 7], &[0, 3, 4, 7, 9], JoinMode::Retain, &mut out).unwrap();
    assert_eq!(out, vec![3, 7]);
}

#[test]
fn test_merge_join_exclude() {
    let mut out = Vec::new();
    merge_join(&[1, 3, 5, 7], &[3, 3, 8], JoinMode::Exclude, &mut out).unwrap();
    assert_eq!(out, vec![1, 5, 7]);

    out.clear();
    merge_join(&[1, 2], &[], JoinMode::Exclude, &mut out).unwrap();
    assert_eq!(out, vec![1, 2]);

    out.clear();
    merge_join(&[1, 2], &[], JoinMode::Retain, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_merge_join_appends() {
    let mut out = vec![42];
    merge_join(&[1, 2], &[2], JoinMode::Retain, &mut out).unwrap();
    assert_eq!(out, vec![42, 2]);
}

#[test]
fn test_single_required_with_and_without_mask() {
    // 0 -> 1, 2 ; 1 -> 0, 2 ; 2 -> 0
    let graph = Adjacency::from_adjacency(&[vec![1, 2], vec![0, 2], vec![0]]).unwrap();
    // walk binds position 0 -> 1, position 1 -> 0
    let table = seeds(2, vec![1, 0]);

    // extend position 2 from position 0 (vertex 1): neighbors {0, 2}
    let plain = generate_all(&graph, &[0], &table, MaskMode::None, CandidateStrategy::Intersect);
    assert_eq!(plain, vec![vec![0, 2]]);

    let masked = generate_all(&graph, &[0], &table, MaskMode::ExcludeVisited, CandidateStrategy::Intersect);
    assert_eq!(masked, vec![vec![2]]);
}

#[test]
fn test_multi_required_intersection() {
    // complete graph on 4 vertices without self loops
    let adjacency: Vec<Vec<usize>> = (0..4).map(|u| (0..4).filter(|&v| v != u).collect()).collect();
    let graph = Adjacency::from_adjacency(&adjacency).unwrap();
    let table = seeds(2, vec![0, 1, 2, 3]);

    for strategy in [CandidateStrategy::Intersect, CandidateStrategy::Count] {
        let masked = generate_all(&graph, &[0, 1], &table, MaskMode::ExcludeVisited, strategy);
        assert_eq!(masked, vec![vec![2, 3], vec![0, 1]]);

        let plain = generate_all(&graph, &[0, 1], &table, MaskMode::None, strategy);
        assert_eq!(plain, vec![vec![2, 3], vec![0, 1]]);
    }
}

#[test]
fn test_three_way_intersection() {
    // 0 -> 3,4,5 ; 1 -> 4,5 ; 2 -> 5,6
    let graph = Adjacency::from_adjacency(&[
        vec![3, 4, 5],
        vec![4, 5],
        vec![5, 6],
        vec![],
        vec![],
        vec![],
        vec![],
    ])
    .unwrap();
    let table = seeds(3, vec![0, 1, 2]);
    for strategy in [CandidateStrategy::Intersect, CandidateStrategy::Count] {
        let out = generate_all(&graph, &[0, 1, 2], &table, MaskMode::ExcludeVisited, strategy);
        assert_eq!(out, vec![vec![5]]);
    }
}

#[test]
fn test_empty_neighbor_list_yields_nothing() {
    let graph = Adjacency::from_adjacency(&[vec![1], vec![], vec![0]]).unwrap();
    let table = seeds(2, vec![0, 1]);
    for strategy in [CandidateStrategy::Intersect, CandidateStrategy::Count] {
        let out = generate_all(&graph, &[0, 1], &table, MaskMode::None, strategy);
        assert_eq!(out, vec![Vec::<usize>::new()]);
    }
}

#[test]
fn test_duplicate_sources_without_mask() {
    // vertex 0 fills both positions; its neighbors are the candidates.
    let graph = Adjacency::from_adjacency(&[vec![0, 1], vec![]]).unwrap();
    let table = seeds(2, vec![0, 0]);
    for strategy in [CandidateStrategy::Intersect, CandidateStrategy::Count] {
        let out = generate_all(&graph, &[0, 1], &table, MaskMode::None, strategy);
        assert_eq!(out, vec![vec![0, 1]]);
    }
}

#[test]
fn test_empty_required_rejected() {
    let graph = Adjacency::empty(1).unwrap();
    assert!(matches!(
        CandidateGenerator::new(&graph, &[], MaskMode::None, CandidateStrategy::Intersect),
        Err(EnumerationError::DegeneratePattern(_))
    ));
}

#[test]
fn test_unbound_required_position() {
    let graph = Adjacency::from_adjacency(&[vec![], vec![]]).unwrap();
    let table = seeds(1, vec![0]);
    let generator =
        CandidateGenerator::new(&graph, &[0, 1], MaskMode::None, CandidateStrategy::Intersect).unwrap();
    let mut out = Vec::new();
    let err = generator
        .generate(table.walk(0), &mut Scratch::new(), &mut out)
        .unwrap_err();
    assert!(matches!(err, EnumerationError::DimensionMismatch(_)));
}
