//! Error taxonomy for a single enumeration call.
//!
//! Every variant is terminal for the call that raised it: the computation is
//! pure, so retrying reproduces the failure and no partial tuple relation is
//! ever handed back.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors produced while validating inputs or running an enumeration.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// A buffer could not grow during map, merge or materialize.
    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Size arithmetic for an intermediate table overflowed `usize`.
    #[error("capacity overflow while sizing {what}")]
    CapacityOverflow {
        /// The table or buffer being sized.
        what: &'static str,
    },

    /// The adjacency relation violates a CSR invariant.
    #[error("invalid adjacency: {0}")]
    InvalidAdjacency(String),

    /// Pattern of size 0, or a position past 0 with no required predecessor.
    #[error("degenerate pattern: {0}")]
    DegeneratePattern(String),

    /// A required predecessor list is malformed.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Row counts or arities of collaborating tables disagree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A seed walk does not satisfy the pattern's required edges.
    #[error("seed walk {row} violates required edge {from} -> {to}")]
    SeedViolation {
        /// Row of the offending seed.
        row: usize,
        /// Pattern position of the required predecessor.
        from: usize,
        /// Pattern position that must be adjacent to `from`.
        to: usize,
    },

    /// A seed walk holds the same vertex at two positions while matches
    /// must be injective.
    #[error("seed walk {row} repeats vertex {vertex}")]
    RepeatedSeedVertex {
        /// Row of the offending seed.
        row: usize,
        /// The vertex bound more than once.
        vertex: usize,
    },

    /// The worker pool could not be started.
    #[error("worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Crate-wide result alias.
pub type Result<T, E = EnumerationError> = core::result::Result<T, E>;

/// Allocates a zero-filled `Vec` of exactly `len` elements, reporting
/// allocation failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, fill);
    Ok(v)
}

/// `a + b`, or `CapacityOverflow` naming `what`.
pub(crate) fn checked_add(a: usize, b: usize, what: &'static str) -> Result<usize> {
    a.checked_add(b)
        .ok_or(EnumerationError::CapacityOverflow { what })
}

/// `a * b`, or `CapacityOverflow` naming `what`.
pub(crate) fn checked_mul(a: usize, b: usize, what: &'static str) -> Result<usize> {
    a.checked_mul(b)
        .ok_or(EnumerationError::CapacityOverflow { what })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        assert_eq!(checked_add(2, 3, "sum").unwrap(), 5);
        assert_eq!(checked_mul(2, 3, "product").unwrap(), 6);
        assert!(matches!(
            checked_add(usize::MAX, 1, "offsets"),
            Err(EnumerationError::CapacityOverflow { what: "offsets" })
        ));
        assert!(matches!(
            checked_mul(usize::MAX, 2, "table"),
            Err(EnumerationError::CapacityOverflow { what: "table" })
        ));
    }
}
