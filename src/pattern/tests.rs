//! Tests for pattern validation and presets.

use super::*;

#[test]
fn test_new_sorts_required_lists() {
    let p = Pattern::new(vec![vec![], vec![0], vec![1, 0]]).unwrap();
    assert_eq!(p.size(), 3);
    assert_eq!(p.required(2), &[0, 1]);
    assert_eq!(p.edge_count(), 3);
}

#[test]
fn test_degenerate_patterns_rejected() {
    assert!(matches!(
        Pattern::new(vec![]),
        Err(EnumerationError::DegeneratePattern(_))
    ));
    assert!(matches!(
        Pattern::new(vec![vec![], vec![]]),
        Err(EnumerationError::DegeneratePattern(_))
    ));
}

#[test]
fn test_invalid_predecessors_rejected() {
    // forward reference
    assert!(matches!(
        Pattern::new(vec![vec![], vec![1]]),
        Err(EnumerationError::InvalidPattern(_))
    ));
    // requirement on position 0
    assert!(matches!(
        Pattern::new(vec![vec![0]]),
        Err(EnumerationError::InvalidPattern(_))
    ));
    // duplicate
    assert!(matches!(
        Pattern::new(vec![vec![], vec![0], vec![0, 0]]),
        Err(EnumerationError::InvalidPattern(_))
    ));
}

#[test]
fn test_single_position_pattern_is_valid() {
    let p = Pattern::new(vec![vec![]]).unwrap();
    assert_eq!(p.size(), 1);
    assert_eq!(p.edge_count(), 0);
}

#[test]
fn test_presets() {
    let path = Pattern::path(4).unwrap();
    assert_eq!(path.required(3), &[2]);

    let clique = Pattern::clique(4).unwrap();
    assert_eq!(clique.required(3), &[0, 1, 2]);
    assert_eq!(clique.edge_count(), 6);

    let cycle = Pattern::cycle(4).unwrap();
    assert_eq!(cycle.required(3), &[0, 2]);
    assert!(Pattern::cycle(2).is_err());

    let star = Pattern::star(4).unwrap();
    assert!(star.iter().skip(1).all(|(_, r)| r == [0]));

    assert!(Pattern::path(0).is_err());
}

#[test]
fn test_serde_validates() {
    let p: Pattern = serde_json::from_str(r#"{"required": [[], [0], [0, 1]]}"#).unwrap();
    assert_eq!(p, Pattern::clique(3).unwrap());

    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"required":[[],[0],[0,1]]}"#);

    assert!(serde_json::from_str::<Pattern>(r#"{"required": [[], []]}"#).is_err());
}
