//! The per-level walk table `R[i]`.
//!
//! Each row is one partial match: exactly `arity` `(position, vertex)` pairs
//! covering positions `0..arity`. Pairs are stored as two parallel buffers
//! (`vertices` as a CSR relation, `positions` flat alongside it) and each
//! row is kept sorted by vertex id. That order is what lets the candidate
//! generator exclude visited vertices with a merge-join; consumers recover
//! the canonical order through `positions`.

use crate::{
    candidate::MaskMode,
    error::{checked_mul, try_filled, EnumerationError, Result},
    graph::Adjacency,
    pattern::Pattern,
    ragged::Ragged,
};

/// A borrowed view of one walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk<'a> {
    vertices: &'a [usize],
    positions: &'a [usize],
}

impl<'a> Walk<'a> {
    /// Vertices of the walk, ascending.
    #[inline]
    pub fn vertices(&self) -> &'a [usize] {
        self.vertices
    }

    /// Positions parallel to [`vertices`](Self::vertices).
    #[inline]
    pub fn positions(&self) -> &'a [usize] {
        self.positions
    }

    /// Number of pairs (positions reached so far).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` for a walk with no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex chosen for `position`, if the walk reached it.
    pub fn vertex_at(&self, position: usize) -> Option<usize> {
        self.positions
            .iter()
            .position(|&p| p == position)
            .map(|idx| self.vertices[idx])
    }

    /// `(position, vertex)` pairs in storage order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.positions.iter().copied().zip(self.vertices.iter().copied())
    }

    /// Writes the walk in canonical order: `out[position] = vertex`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than the largest stored position.
    pub fn write_canonical(&self, out: &mut [usize]) {
        for (p, v) in self.pairs() {
            out[p] = v;
        }
    }
}

/// A ragged relation of walks that all share one arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkTable {
    arity: usize,
    vertices: Ragged<usize>,
    positions: Vec<usize>,
}

impl WalkTable {
    /// `R[0]`: one row per graph vertex, each holding `(0, vertex)`.
    ///
    /// # Errors
    /// Returns `Allocation` if the table cannot be allocated.
    pub fn identity(n: usize) -> Result<Self> {
        let mut values = Vec::new();
        values.try_reserve_exact(n)?;
        values.extend(0..n);
        Ok(Self {
            arity: 1,
            vertices: Ragged::from_uniform(1, values)?,
            positions: try_filled(n, 0usize)?,
        })
    }

    /// Builds a table from seed walks given in position order: row `r` of
    /// `seeds` binds position `j` to `seeds.row(r)[j]`.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the rows are empty or of unequal
    /// length, and `Allocation` if the table cannot be allocated.
    pub fn from_seeds(seeds: &Ragged<usize>) -> Result<Self> {
        let arity = match seeds.rows().next() {
            Some(first) => first.len(),
            None => {
                return Err(EnumerationError::DimensionMismatch(
                    "no seed walks given".into(),
                ))
            }
        };
        if arity == 0 {
            return Err(EnumerationError::DimensionMismatch(
                "seed walks must bind at least position 0".into(),
            ));
        }
        if let Some(r) = seeds.rows().position(|row| row.len() != arity) {
            return Err(EnumerationError::DimensionMismatch(format!(
                "seed walk {r} binds {} positions, expected {arity}",
                seeds.row_len(r)
            )));
        }

        let total = checked_mul(seeds.row_count(), arity, "seed walk table")?;
        let mut vertices = Vec::new();
        vertices.try_reserve_exact(total)?;
        let mut positions = Vec::new();
        positions.try_reserve_exact(total)?;

        let mut order: Vec<usize> = Vec::with_capacity(arity);
        for row in seeds.rows() {
            order.clear();
            order.extend(0..arity);
            order.sort_by_key(|&p| row[p]);
            for &p in &order {
                vertices.push(row[p]);
                positions.push(p);
            }
        }

        Ok(Self {
            arity,
            vertices: Ragged::from_uniform(arity, vertices)?,
            positions,
        })
    }

    /// Assembles a table from already-sorted parts produced by the
    /// materializer.
    pub(crate) fn from_sorted_parts(
        arity: usize,
        vertices: Vec<usize>,
        positions: Vec<usize>,
    ) -> Result<Self> {
        if vertices.len() != positions.len() {
            return Err(EnumerationError::DimensionMismatch(format!(
                "{} vertices but {} positions",
                vertices.len(),
                positions.len()
            )));
        }
        let table = Self {
            arity,
            vertices: Ragged::from_uniform(arity, vertices)?,
            positions,
        };
        debug_assert!(table.walks().all(|w| w.vertices().windows(2).all(|p| p[0] <= p[1])));
        Ok(table)
    }

    /// Checks every row against the vertex range and the required edges among
    /// its bound positions. Under [`MaskMode::ExcludeVisited`] a row must
    /// also hold distinct vertices, since extension never revisits them.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the arity exceeds the pattern size or a vertex
    ///   is out of range
    /// - `RepeatedSeedVertex` for the first row binding one vertex twice
    ///   while matches are injective
    /// - `SeedViolation` for the first row missing a required edge
    pub fn validate(&self, adjacency: &Adjacency, pattern: &Pattern, mask_mode: MaskMode) -> Result<()> {
        if self.arity > pattern.size() {
            return Err(EnumerationError::DimensionMismatch(format!(
                "walks bind {} positions but the pattern has {}",
                self.arity,
                pattern.size()
            )));
        }
        let n = adjacency.node_count();
        if let Some(&v) = self.vertices.values().iter().find(|&&v| v >= n) {
            return Err(EnumerationError::DimensionMismatch(format!(
                "walk vertex {v} is out of bounds for n={n}"
            )));
        }

        let mut tuple = vec![0usize; self.arity];
        for (row, walk) in self.walks().enumerate() {
            if mask_mode == MaskMode::ExcludeVisited {
                // rows are sorted by vertex, so repeats are adjacent
                if let Some(pair) = walk.vertices().windows(2).find(|w| w[0] == w[1]) {
                    return Err(EnumerationError::RepeatedSeedVertex { row, vertex: pair[0] });
                }
            }
            walk.write_canonical(&mut tuple);
            for (to, req) in pattern.iter().take(self.arity) {
                for &from in req {
                    if !adjacency.has_edge(tuple[from], tuple[to]) {
                        return Err(EnumerationError::SeedViolation { row, from, to });
                    }
                }
            }
        }
        Ok(())
    }

    /// Positions bound by every walk (`i + 1` at level `i`).
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of walks `m_i`.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.vertices.row_count()
    }

    /// Returns `true` if the table holds no walks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Walk `row`.
    ///
    /// # Panics
    /// Panics if `row >= row_count()`.
    #[inline]
    pub fn walk(&self, row: usize) -> Walk<'_> {
        let range = self.vertices.row_range(row);
        Walk {
            vertices: &self.vertices.values()[range.clone()],
            positions: &self.positions[range],
        }
    }

    /// Iterates over all walks in row order.
    pub fn walks(&self) -> impl ExactSizeIterator<Item = Walk<'_>> + '_ {
        (0..self.row_count()).map(move |r| self.walk(r))
    }

    /// Row offsets `I[i]`.
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        self.vertices.offsets()
    }

    /// Flattened vertex ids `J[i]`.
    #[inline]
    pub fn vertex_values(&self) -> &[usize] {
        self.vertices.values()
    }

    /// Flattened positions `V[i]`.
    #[inline]
    pub fn position_values(&self) -> &[usize] {
        &self.positions
    }
}
