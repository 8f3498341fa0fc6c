//! The tuple relation handed back to callers.

use super::stats::EnumerationStats;

/// Flat relation of length-`arity` tuples, entry `j` of a tuple being the
/// vertex matched to pattern position `j`.
///
/// Tuple order carries no meaning; compare results as sets. Equality looks
/// at the tuples only, never at the timings in [`stats`](Self::stats).
#[derive(Debug, Clone)]
pub struct Matches {
    arity: usize,
    values: Vec<usize>,
    stats: EnumerationStats,
}

impl Matches {
    pub(crate) fn new(arity: usize, values: Vec<usize>, stats: EnumerationStats) -> Self {
        debug_assert!(arity > 0 && values.len() % arity == 0);
        Self {
            arity,
            values,
            stats,
        }
    }

    /// Tuple width (the pattern size `k`).
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of tuples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.arity
    }

    /// Returns `true` if nothing matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tuple `index`, if present.
    pub fn get(&self, index: usize) -> Option<&[usize]> {
        let start = index.checked_mul(self.arity)?;
        self.values.get(start..start + self.arity)
    }

    /// Iterates over the tuples.
    pub fn iter(&self) -> core::slice::ChunksExact<'_, usize> {
        self.values.chunks_exact(self.arity)
    }

    /// All tuples, sorted lexicographically.
    pub fn to_sorted_vec(&self) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = self.iter().map(<[usize]>::to_vec).collect();
        out.sort_unstable();
        out
    }

    /// The flat value buffer, `len() * arity()` entries.
    #[inline]
    pub fn as_flat(&self) -> &[usize] {
        &self.values
    }

    /// Accounting for the call that produced these matches.
    #[inline]
    pub fn stats(&self) -> &EnumerationStats {
        &self.stats
    }

    /// Decomposes into the flat value buffer.
    pub fn into_flat(self) -> Vec<usize> {
        self.values
    }
}

impl PartialEq for Matches {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity && self.values == other.values
    }
}

impl Eq for Matches {}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a [usize];
    type IntoIter = core::slice::ChunksExact<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of a count-only call. Equality compares `count` only.
#[derive(Debug, Clone)]
pub struct MatchCount {
    /// Number of matches.
    pub count: usize,
    /// Accounting for the call.
    pub stats: EnumerationStats,
}

impl PartialEq for MatchCount {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
    }
}

impl Eq for MatchCount {}
