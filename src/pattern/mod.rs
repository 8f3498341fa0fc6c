//! Query patterns: ordered positions plus required predecessor edges.
//!
//! Position `i` lists the earlier positions `req(i)` whose chosen vertex must
//! have an edge *to* the vertex chosen for `i`. Position `0` never has
//! requirements; every later position has at least one, which keeps each
//! extension step anchored to the walk built so far.

use serde::{Deserialize, Serialize};

use crate::error::{EnumerationError, Result};

/// A validated, connected query pattern of `k >= 1` positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub struct Pattern {
    required: Vec<Vec<usize>>,
}

/// Unvalidated wire form of a [`Pattern`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPattern {
    required: Vec<Vec<usize>>,
}

impl TryFrom<RawPattern> for Pattern {
    type Error = EnumerationError;

    fn try_from(raw: RawPattern) -> Result<Self> {
        Self::new(raw.required)
    }
}

impl From<Pattern> for RawPattern {
    fn from(p: Pattern) -> Self {
        Self {
            required: p.required,
        }
    }
}

impl Pattern {
    /// Validates and normalizes (sorts) the required predecessor lists.
    ///
    /// # Errors
    /// - `DegeneratePattern` if `required` is empty, or some position `i >= 1`
    ///   has no required predecessor
    /// - `InvalidPattern` if a list names a position `>= i` or repeats one
    pub fn new(mut required: Vec<Vec<usize>>) -> Result<Self> {
        if required.is_empty() {
            return Err(EnumerationError::DegeneratePattern(
                "pattern has no positions".into(),
            ));
        }
        for (i, req) in required.iter_mut().enumerate() {
            if i > 0 && req.is_empty() {
                return Err(EnumerationError::DegeneratePattern(format!(
                    "position {i} has no required predecessor"
                )));
            }
            if let Some(&p) = req.iter().find(|&&p| p >= i) {
                return Err(EnumerationError::InvalidPattern(format!(
                    "position {i} requires position {p}, which is not a predecessor"
                )));
            }
            req.sort_unstable();
            if let Some(w) = req.windows(2).find(|w| w[0] == w[1]) {
                return Err(EnumerationError::InvalidPattern(format!(
                    "position {i} lists predecessor {} twice",
                    w[0]
                )));
            }
        }
        Ok(Self { required })
    }

    /// `v0 -> v1 -> ... -> v(k-1)`.
    ///
    /// # Errors
    /// Returns `DegeneratePattern` if `k == 0`.
    pub fn path(k: usize) -> Result<Self> {
        Self::new((0..k).map(|i| if i == 0 { vec![] } else { vec![i - 1] }).collect())
    }

    /// Every earlier position is required for every later one.
    ///
    /// # Errors
    /// Returns `DegeneratePattern` if `k == 0`.
    pub fn clique(k: usize) -> Result<Self> {
        Self::new((0..k).map(|i| (0..i).collect()).collect())
    }

    /// A path whose last position also closes back on position `0`.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if `k < 3`.
    pub fn cycle(k: usize) -> Result<Self> {
        if k < 3 {
            return Err(EnumerationError::InvalidPattern(format!(
                "a cycle needs at least 3 positions, got {k}"
            )));
        }
        let mut required: Vec<Vec<usize>> =
            (0..k).map(|i| if i == 0 { vec![] } else { vec![i - 1] }).collect();
        required[k - 1].insert(0, 0);
        Self::new(required)
    }

    /// Position `0` is the hub; every other position hangs off it.
    ///
    /// # Errors
    /// Returns `DegeneratePattern` if `k == 0`.
    pub fn star(k: usize) -> Result<Self> {
        Self::new((0..k).map(|i| if i == 0 { vec![] } else { vec![0] }).collect())
    }

    /// Number of positions `k`.
    #[inline]
    pub fn size(&self) -> usize {
        self.required.len()
    }

    /// Sorted required predecessors of `position`.
    ///
    /// # Panics
    /// Panics if `position >= size()`.
    #[inline]
    pub fn required(&self, position: usize) -> &[usize] {
        &self.required[position]
    }

    /// Iterates `(position, req(position))` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.required.iter().enumerate().map(|(i, r)| (i, r.as_slice()))
    }

    /// Number of required edges across all positions.
    pub fn edge_count(&self) -> usize {
        self.required.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests;
