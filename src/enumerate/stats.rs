//! Per-level accounting for one enumeration call.

use std::time::Duration;

use serde::Serialize;

/// What one extension level consumed and produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    /// Pattern position this level filled.
    pub position: usize,
    /// Walks in `R[position - 1]`.
    pub walks: usize,
    /// Nonzeros of `C[position]`.
    pub candidates: usize,
    /// Candidate generation across all partitions.
    pub map: Duration,
    /// Concatenating partition buffers.
    pub merge: Duration,
    /// Building `R[position]`.
    pub materialize: Duration,
}

/// Accounting for a whole call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumerationStats {
    /// Partitions per level.
    pub threads: usize,
    /// Levels in execution order; stops early at an empty level.
    pub levels: Vec<LevelStats>,
    /// Wall time of the call.
    pub total: Duration,
}

impl EnumerationStats {
    /// Largest walk table seen at any level.
    pub fn peak_walks(&self) -> usize {
        self.levels.iter().map(|l| l.walks.max(l.candidates)).max().unwrap_or(0)
    }
}
