//! A compact CSR (compressed sparse row) adjacency relation.
//!
//! Vertex ids are dense integers `0..n`. Row `u` lists the out-neighbors of
//! `u` in strictly ascending order, which is what the merge-join candidate
//! generator relies on.
//!
//! Memory layout:
//! - `rows.offsets()`: `Vec<usize>` of length `n + 1` (row offsets)
//! - `rows.values()`: contiguous `usize` targets for each row
//!
//! The relation is immutable once built, so a shared `&Adjacency` can be read
//! from every worker thread without synchronization.

use crate::{
    error::{checked_add, try_filled, EnumerationError, Result},
    ragged::Ragged,
};

/// An immutable CSR adjacency relation with sorted, duplicate-free rows.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m \log d)\) | Sorts and deduplicates each row |
/// | `from_csr_parts` | \(O(n + m)\) | Validates without copying |
/// | `neighbors` | \(O(1)\) | Borrowed sorted slice |
/// | `degree` | \(O(1)\) | Offset difference |
/// | `has_edge` | \(O(\log d)\) | Binary search in the row |
/// | `symmetrize` | \(O(n + m \log d)\) | Adds every reverse edge |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    rows: Ragged<usize>,
}

impl Adjacency {
    /// A relation over `n` vertices with no edges.
    ///
    /// # Errors
    /// Returns `Allocation` if the offset array cannot be allocated, or
    /// `CapacityOverflow` if `n + 1` overflows.
    pub fn empty(n: usize) -> Result<Self> {
        let offsets = try_filled(checked_add(n, 1, "adjacency offsets")?, 0usize)?;
        Ok(Self {
            rows: Ragged::from_parts(offsets, Vec::new())?,
        })
    }

    /// Builds a relation from an adjacency list, sorting and deduplicating
    /// every row.
    ///
    /// # Errors
    /// Returns `InvalidAdjacency` if any edge references a vertex `>= n`.
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Result<Self> {
        let n = adjacency.len();
        let total: usize = adjacency.iter().map(Vec::len).sum();
        let mut rows = Ragged::try_with_capacity(n, total)?;
        let mut scratch = Vec::new();

        for (u, nbrs) in adjacency.iter().enumerate() {
            if let Some(&v) = nbrs.iter().find(|&&v| v >= n) {
                return Err(EnumerationError::InvalidAdjacency(format!(
                    "edge {u}->{v} is out of bounds for n={n}"
                )));
            }
            scratch.clear();
            scratch.extend_from_slice(nbrs);
            scratch.sort_unstable();
            scratch.dedup();
            rows.try_push_row(&scratch)?;
        }

        Ok(Self { rows })
    }

    /// Builds a relation over `n` vertices from an edge list.
    ///
    /// # Errors
    /// Returns `InvalidAdjacency` if any endpoint is `>= n`.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency = vec![Vec::new(); n];
        for (u, v) in edges {
            if u >= n || v >= n {
                return Err(EnumerationError::InvalidAdjacency(format!(
                    "edge {u}->{v} is out of bounds for n={n}"
                )));
            }
            adjacency[u].push(v);
        }
        Self::from_adjacency(&adjacency)
    }

    /// Builds a relation directly from CSR parts.
    ///
    /// # Errors
    /// Returns `InvalidAdjacency`
    /// - if `offsets.len() < 1` or offsets are not monotone
    /// - if `offsets.last() != targets.len()`
    /// - if any row is not strictly ascending or references a vertex `>= n`
    pub fn from_csr_parts(offsets: Vec<usize>, targets: Vec<usize>) -> Result<Self> {
        let rows = Ragged::from_parts(offsets, targets)
            .map_err(|e| EnumerationError::InvalidAdjacency(e.to_string()))?;
        let n = rows.row_count();
        for (u, row) in rows.rows().enumerate() {
            if let Some(w) = row.windows(2).find(|w| w[0] >= w[1]) {
                return Err(EnumerationError::InvalidAdjacency(format!(
                    "row {u} is not strictly ascending at {} -> {}",
                    w[0], w[1]
                )));
            }
            if let Some(&v) = row.last().filter(|&&v| v >= n) {
                return Err(EnumerationError::InvalidAdjacency(format!(
                    "edge {u}->{v} is out of bounds for n={n}"
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Returns a relation that also contains every reverse edge.
    ///
    /// # Errors
    /// Returns `Allocation` if the new relation cannot be allocated.
    pub fn symmetrize(&self) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); self.node_count()];
        for u in 0..self.node_count() {
            for &v in self.neighbors(u) {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }
        Self::from_adjacency(&adjacency)
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.rows.row_count()
    }

    /// Number of stored (directed) edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.rows.len()
    }

    /// Sorted out-neighbors of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.rows.row(node)
    }

    /// Out-degree of `node`.
    ///
    /// # Panics
    /// Panics if `node >= node_count()`.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.rows.row_len(node)
    }

    /// Checks if an edge exists from `from` to `to`.
    ///
    /// # Panics
    /// Panics if `from` is out of bounds.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }

    /// The row-offset array, length `n + 1`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        self.rows.offsets()
    }

    /// The flat target array.
    #[inline]
    pub fn targets(&self) -> &[usize] {
        self.rows.values()
    }
}

#[cfg(test)]
mod tests;
