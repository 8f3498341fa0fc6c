//! # `walkjoin` - Breadth-First Subgraph Pattern Enumeration
//!
//! Given a graph's adjacency relation in CSR form and a small connected query
//! pattern, `walkjoin` enumerates every tuple of graph vertices that
//! instantiates the pattern: each required pattern edge is backed by a real
//! graph edge between the chosen vertices.
//!
//! Instead of extending one partial match at a time, the engine extends the
//! whole set of partial matches ("walks") by one pattern position per level,
//! with the rows of each level split across a fixed pool of workers.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! 1. **Adjacency** ([`Adjacency`]): immutable CSR relation with sorted rows,
//!    shared read-only by every worker.
//! 2. **Walk table** ([`WalkTable`]): ragged relation of partial matches, one
//!    `(position, vertex)` pair per reached position, rows sorted by vertex.
//! 3. **Candidate generator** ([`CandidateGenerator`]): for one walk, the
//!    sorted vertices adjacent from every required predecessor, optionally
//!    excluding vertices the walk already holds.
//! 4. **Partitioner** ([`partition`]): contiguous row ranges, one per worker,
//!    each mapped into a private buffer.
//! 5. **Merger / materializer** ([`merge`]): prefix-sum scatters producing the
//!    candidate relation and then the next walk table.
//! 6. **Driver** ([`Enumerator`]): the level-by-level state machine.
//!
//! ### Level invariants
//!
//! - `R[0]` has exactly `n` rows, row `v` holding `(0, v)`.
//! - Every row of `R[i]` covers positions `0..=i` once each.
//! - `C[i]` has the row count of `R[i-1]`; `R[i]` has one row per nonzero of
//!   `C[i]`.
//! - An empty `C[i]` ends the call with an empty result.
//!
//! Output tuple order is unspecified and depends on the partitioning; compare
//! results as sets.
//!
//! ## Example
//!
//! ```rust
//! use walkjoin::{Adjacency, EnumerationConfig, Enumerator, Pattern};
//!
//! // 0 <-> 1 <-> 2 <-> 0
//! let graph = Adjacency::from_edges(3, [(0, 1), (1, 2), (0, 2)])?.symmetrize()?;
//! let triangle = Pattern::clique(3)?;
//!
//! let enumerator = Enumerator::new(EnumerationConfig::default().with_threads(2))?;
//! let matches = enumerator.enumerate(&graph, &triangle)?;
//! assert_eq!(matches.len(), 6);
//! for tuple in &matches {
//!     assert!(graph.has_edge(tuple[0], tuple[1]));
//! }
//! # Ok::<(), walkjoin::EnumerationError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod candidate;
pub mod concurrency;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod graph;
pub mod merge;
pub mod partition;
pub mod pattern;
pub mod ragged;
pub mod walk;

pub use candidate::{CandidateGenerator, CandidateStrategy, MaskMode};
pub use concurrency::WorkerPool;
pub use config::EnumerationConfig;
pub use enumerate::{EnumerationStats, Enumerator, LevelStats, MatchCount, Matches};
pub use error::{EnumerationError, Result};
pub use graph::Adjacency;
pub use pattern::Pattern;
pub use ragged::Ragged;
pub use walk::{Walk, WalkTable};

/// Enumerates `pattern` in `adjacency` with the default configuration.
///
/// # Errors
/// See [`Enumerator::enumerate`].
pub fn enumerate(adjacency: &Adjacency, pattern: &Pattern) -> Result<Matches> {
    Enumerator::new(EnumerationConfig::default())?.enumerate(adjacency, pattern)
}

// Compile-time layout checks for the hot per-walk types.
const _: () = {
    use core::mem;

    // A walk view is two borrowed slices and nothing else.
    assert!(mem::size_of::<Walk<'static>>() == 4 * mem::size_of::<usize>());
    assert!(mem::size_of::<partition::Partition>() == 2 * mem::size_of::<usize>());
};
