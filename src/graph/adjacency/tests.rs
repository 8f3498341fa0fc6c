//! Tests for the CSR adjacency relation.

use super::*;

#[test]
fn test_from_adjacency_sorts_and_dedups() {
    // 0 -> 2, 1, 2
    // 1 -> 0
    // 2 ->
    let adjacency = vec![vec![2, 1, 2], vec![0], vec![]];
    let graph = Adjacency::from_adjacency(&adjacency).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.neighbors(0), &[1, 2]);
    assert_eq!(graph.neighbors(1), &[0]);
    assert!(graph.neighbors(2).is_empty());
    assert_eq!(graph.degree(0), 2);
    assert!(graph.has_edge(0, 2));
    assert!(!graph.has_edge(2, 0));
}

#[test]
fn test_from_edges_out_of_bounds() {
    let err = Adjacency::from_edges(2, [(0, 1), (1, 5)]).unwrap_err();
    assert!(matches!(err, EnumerationError::InvalidAdjacency(_)));
}

#[test]
fn test_from_csr_parts_reconstruction() {
    // 0 -> 1, 2
    // 1 -> 2
    // 2 ->
    let graph = Adjacency::from_csr_parts(vec![0, 2, 3, 3], vec![1, 2, 2]).unwrap();
    assert_eq!(graph.neighbors(0), &[1, 2]);
    assert_eq!(graph.neighbors(1), &[2]);
    assert_eq!(graph.offsets(), &[0, 2, 3, 3]);
    assert_eq!(graph.targets(), &[1, 2, 2]);
}

#[test]
fn test_from_csr_parts_rejects_bad_rows() {
    // unsorted row
    assert!(Adjacency::from_csr_parts(vec![0, 2, 2], vec![1, 0]).is_err());
    // duplicate target
    assert!(Adjacency::from_csr_parts(vec![0, 2, 2], vec![1, 1]).is_err());
    // target out of range
    assert!(Adjacency::from_csr_parts(vec![0, 1, 1], vec![2]).is_err());
    // last offset mismatch
    assert!(Adjacency::from_csr_parts(vec![0, 1, 3], vec![1]).is_err());
}

#[test]
fn test_symmetrize() {
    let graph = Adjacency::from_edges(3, [(0, 1), (1, 2)]).unwrap();
    let sym = graph.symmetrize().unwrap();
    assert_eq!(sym.neighbors(0), &[1]);
    assert_eq!(sym.neighbors(1), &[0, 2]);
    assert_eq!(sym.neighbors(2), &[1]);
    assert_eq!(sym.edge_count(), 4);
}

#[test]
fn test_empty_graph() {
    let graph = Adjacency::empty(5).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 0);
    for u in 0..5 {
        assert!(graph.neighbors(u).is_empty());
    }

    let none = Adjacency::from_adjacency(&[]).unwrap();
    assert_eq!(none.node_count(), 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_neighbors_out_of_bounds_panics() {
    let graph = Adjacency::empty(1).unwrap();
    let _ = graph.neighbors(1);
}

#[test]
fn test_empty_rejects_overflowing_vertex_count() {
    assert!(matches!(
        Adjacency::empty(usize::MAX),
        Err(EnumerationError::CapacityOverflow { .. })
    ));
}
