//! Candidate generation: the masked neighbor-intersection primitive.
//!
//! For one walk and the required predecessor set `req(i)`, the generator
//! produces the sorted list of graph vertices adjacent *from* the vertex at
//! every required position. With [`MaskMode::ExcludeVisited`] the vertices
//! already held by the walk are removed as well, so matches are injective.
//!
//! Both strategies share one sorted merge-join, [`merge_join`], which either
//! retains or excludes matching elements.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    error::{try_filled, EnumerationError, Result},
    graph::Adjacency,
    walk::Walk,
};

/// Whether vertices already present in a walk may be chosen again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskMode {
    /// No exclusion: a vertex may fill several positions of one match.
    None,
    /// Candidates already in the walk are dropped (injective matches).
    #[default]
    ExcludeVisited,
}

/// How a candidate set is computed from the required neighbor lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateStrategy {
    /// Seed with the smallest neighbor list, then merge-join the rest.
    #[default]
    Intersect,
    /// Count hits per vertex across all required lists and keep the
    /// vertices hit by every one.
    Count,
}

/// What [`merge_join`] does with elements present in both inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinMode {
    /// Keep `left` elements found in `right` (intersection).
    Retain,
    /// Keep `left` elements *not* found in `right` (difference).
    Exclude,
}

/// Linear merge of two ascending slices, appending the selected elements of
/// `left` to `out` in ascending order.
///
/// `left` must be strictly ascending; `right` may repeat values.
///
/// # Errors
/// Returns `Allocation` if `out` cannot grow by `left.len()`.
pub fn merge_join(left: &[usize], right: &[usize], mode: JoinMode, out: &mut Vec<usize>) -> Result<()> {
    out.try_reserve(left.len())?;
    let (mut i, mut j) = (0, 0);
    while i < left.len() {
        if j >= right.len() {
            if mode == JoinMode::Exclude {
                out.extend_from_slice(&left[i..]);
            }
            break;
        }
        match left[i].cmp(&right[j]) {
            Ordering::Less => {
                if mode == JoinMode::Exclude {
                    out.push(left[i]);
                }
                i += 1;
            }
            Ordering::Equal => {
                if mode == JoinMode::Retain {
                    out.push(left[i]);
                }
                i += 1;
            }
            Ordering::Greater => j += 1,
        }
    }
    Ok(())
}

/// Per-worker reusable buffers; one per partition, never shared.
#[derive(Debug, Default)]
pub struct Scratch {
    sources: Vec<usize>,
    front: Vec<usize>,
    back: Vec<usize>,
    counts: Vec<u32>,
    touched: Vec<usize>,
}

impl Scratch {
    /// Empty scratch space.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Computes candidate sets for one extension level.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    adjacency: &'a Adjacency,
    required: &'a [usize],
    mask_mode: MaskMode,
    strategy: CandidateStrategy,
}

impl<'a> CandidateGenerator<'a> {
    /// A generator for the level whose required predecessors are `required`.
    ///
    /// # Errors
    /// Returns `DegeneratePattern` if `required` is empty; position `0` is
    /// seeded by the identity table, never generated.
    pub fn new(
        adjacency: &'a Adjacency,
        required: &'a [usize],
        mask_mode: MaskMode,
        strategy: CandidateStrategy,
    ) -> Result<Self> {
        if required.is_empty() {
            return Err(EnumerationError::DegeneratePattern(
                "candidate generation needs at least one required predecessor".into(),
            ));
        }
        Ok(Self {
            adjacency,
            required,
            mask_mode,
            strategy,
        })
    }

    /// Appends the sorted candidates extending `walk` to `out`.
    ///
    /// Leaves `out` untouched when some required neighbor list is empty.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the walk does not bind every required position
    /// - `Allocation` if a buffer cannot grow
    pub fn generate(&self, walk: Walk<'_>, scratch: &mut Scratch, out: &mut Vec<usize>) -> Result<()> {
        let sources = &mut scratch.sources;
        sources.clear();
        sources.extend(
            walk.pairs()
                .filter(|(p, _)| self.required.binary_search(p).is_ok())
                .map(|(_, v)| v),
        );
        if sources.len() != self.required.len() {
            return Err(EnumerationError::DimensionMismatch(format!(
                "walk binds {} of {} required positions",
                sources.len(),
                self.required.len()
            )));
        }

        // Cheapest list first; also lets an empty list short-circuit.
        sources.sort_unstable_by_key(|&v| self.adjacency.degree(v));
        if self.adjacency.degree(sources[0]) == 0 {
            return Ok(());
        }

        match self.strategy {
            CandidateStrategy::Intersect => self.intersect(walk, scratch, out),
            CandidateStrategy::Count => self.count(walk, scratch, out),
        }
    }

    fn mask<'w>(&self, walk: Walk<'w>) -> &'w [usize] {
        match self.mask_mode {
            MaskMode::None => &[],
            MaskMode::ExcludeVisited => walk.vertices(),
        }
    }

    fn intersect(&self, walk: Walk<'_>, scratch: &mut Scratch, out: &mut Vec<usize>) -> Result<()> {
        let Scratch {
            sources, front, back, ..
        } = scratch;
        let seed = self.adjacency.neighbors(sources[0]);
        let mask = self.mask(walk);

        if sources.len() == 1 {
            return merge_join(seed, mask, JoinMode::Exclude, out);
        }

        front.clear();
        merge_join(seed, mask, JoinMode::Exclude, front)?;

        let last = sources.len() - 1;
        for &src in &sources[1..last] {
            if front.is_empty() {
                return Ok(());
            }
            back.clear();
            merge_join(front.as_slice(), self.adjacency.neighbors(src), JoinMode::Retain, back)?;
            core::mem::swap(front, back);
        }
        merge_join(front.as_slice(), self.adjacency.neighbors(sources[last]), JoinMode::Retain, out)
    }

    fn count(&self, walk: Walk<'_>, scratch: &mut Scratch, out: &mut Vec<usize>) -> Result<()> {
        let Scratch {
            sources,
            front,
            counts,
            touched,
            ..
        } = scratch;
        if counts.len() != self.adjacency.node_count() {
            *counts = try_filled(self.adjacency.node_count(), 0u32)?;
        }

        touched.clear();
        for &src in sources.iter() {
            let nbrs = self.adjacency.neighbors(src);
            touched.try_reserve(nbrs.len())?;
            for &v in nbrs {
                if counts[v] == 0 {
                    touched.push(v);
                }
                counts[v] += 1;
            }
        }

        let need = u32::try_from(sources.len()).unwrap_or(u32::MAX);
        front.clear();
        front.try_reserve(touched.len())?;
        for &v in touched.iter() {
            if counts[v] == need {
                front.push(v);
            }
            counts[v] = 0;
        }
        front.sort_unstable();

        merge_join(front.as_slice(), self.mask(walk), JoinMode::Exclude, out)
    }
}

#[cfg(test)]
mod tests;
