//! The level-by-level enumeration driver.
//!
//! A call walks through `Init -> Level(s) -> ... -> Level(k-1) -> Extract ->
//! Done`, where `s` is the arity of the starting walk table (`1` for the
//! identity table). Each level is three fork–join regions on the worker pool:
//! map (candidate generation per partition), merge, and materialize. A level
//! that yields no candidates jumps straight to `Done` with an empty result.

pub mod matches;
pub mod stats;

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    candidate::{CandidateGenerator, Scratch},
    concurrency::WorkerPool,
    config::EnumerationConfig,
    error::{checked_mul, try_filled, Result},
    graph::Adjacency,
    merge::{materialize, merge_partitions},
    partition::{map_partitions, partition_rows, PartitionBuffer},
    pattern::Pattern,
    ragged::Ragged,
    walk::WalkTable,
};

pub use matches::{MatchCount, Matches};
pub use stats::{EnumerationStats, LevelStats};

/// What the caller wants out of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Tuples,
    Count,
}

/// Terminal result of the state machine.
#[derive(Debug)]
enum Outcome {
    Empty,
    Tuples(Vec<usize>),
    Count(usize),
}

#[derive(Debug)]
enum State {
    /// `walks` binds positions `0..position`; next to fill is `position`.
    Level { position: usize, walks: WalkTable },
    Extract { walks: WalkTable },
    Done(Outcome),
}

/// Runs enumerations on a worker pool sized once at construction.
///
/// The adjacency relation is only ever read, so one `Enumerator` can serve
/// any number of sequential calls against different graphs and patterns.
#[derive(Debug)]
pub struct Enumerator {
    config: EnumerationConfig,
    pool: WorkerPool,
}

impl Enumerator {
    /// Starts the worker pool described by `config`.
    ///
    /// # Errors
    /// Returns `WorkerPool` if the threads cannot be spawned.
    pub fn new(config: EnumerationConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.resolved_threads())?;
        Ok(Self { config, pool })
    }

    /// The configuration this enumerator was built with.
    #[inline]
    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Worker (and partition) count.
    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    /// Enumerates every match of `pattern` in `adjacency`.
    ///
    /// # Errors
    /// Returns `Allocation`/`CapacityOverflow` if an intermediate table does
    /// not fit; no partial result is returned.
    pub fn enumerate(&self, adjacency: &Adjacency, pattern: &Pattern) -> Result<Matches> {
        let walks = WalkTable::identity(adjacency.node_count())?;
        self.tuples(adjacency, pattern, walks)
    }

    /// Enumerates the matches extending the given seed walks.
    ///
    /// Row `r` of `seeds` binds positions `0..s` in order; all rows must have
    /// the same length `s` with `1 <= s <= k`. An empty batch (no rows)
    /// yields an empty result.
    ///
    /// # Errors
    /// - `DimensionMismatch` for malformed seeds or out-of-range vertices
    /// - `RepeatedSeedVertex` if a seed binds one vertex twice under
    ///   [`MaskMode::ExcludeVisited`](crate::MaskMode::ExcludeVisited); such
    ///   rows are rejected, not skipped
    /// - `SeedViolation` if a seed misses one of its required edges
    /// - `Allocation`/`CapacityOverflow` as for [`enumerate`](Self::enumerate)
    pub fn enumerate_from(
        &self,
        adjacency: &Adjacency,
        pattern: &Pattern,
        seeds: &Ragged<usize>,
    ) -> Result<Matches> {
        match self.seed_table(adjacency, pattern, seeds)? {
            Some(walks) => self.tuples(adjacency, pattern, walks),
            None => Ok(Matches::new(pattern.size(), Vec::new(), self.empty_stats())),
        }
    }

    /// Counts the matches of `pattern` without materializing the last level.
    ///
    /// # Errors
    /// As for [`enumerate`](Self::enumerate).
    pub fn count(&self, adjacency: &Adjacency, pattern: &Pattern) -> Result<MatchCount> {
        let walks = WalkTable::identity(adjacency.node_count())?;
        self.counted(adjacency, pattern, walks)
    }

    /// Counts the matches extending the given seed walks.
    ///
    /// # Errors
    /// As for [`enumerate_from`](Self::enumerate_from).
    pub fn count_from(
        &self,
        adjacency: &Adjacency,
        pattern: &Pattern,
        seeds: &Ragged<usize>,
    ) -> Result<MatchCount> {
        match self.seed_table(adjacency, pattern, seeds)? {
            Some(walks) => self.counted(adjacency, pattern, walks),
            None => Ok(MatchCount {
                count: 0,
                stats: self.empty_stats(),
            }),
        }
    }

    /// Validated start table for a seeded call, `None` for an empty batch.
    fn seed_table(
        &self,
        adjacency: &Adjacency,
        pattern: &Pattern,
        seeds: &Ragged<usize>,
    ) -> Result<Option<WalkTable>> {
        if seeds.row_count() == 0 {
            debug!("empty seed batch");
            return Ok(None);
        }
        let walks = WalkTable::from_seeds(seeds)?;
        walks.validate(adjacency, pattern, self.config.mask_mode)?;
        Ok(Some(walks))
    }

    fn empty_stats(&self) -> EnumerationStats {
        EnumerationStats {
            threads: self.pool.threads(),
            ..EnumerationStats::default()
        }
    }

    fn tuples(&self, adjacency: &Adjacency, pattern: &Pattern, walks: WalkTable) -> Result<Matches> {
        let (outcome, stats) = self.run(adjacency, pattern, walks, Goal::Tuples)?;
        let values = match outcome {
            Outcome::Tuples(values) => values,
            Outcome::Empty | Outcome::Count(_) => Vec::new(),
        };
        Ok(Matches::new(pattern.size(), values, stats))
    }

    fn counted(&self, adjacency: &Adjacency, pattern: &Pattern, walks: WalkTable) -> Result<MatchCount> {
        let (outcome, stats) = self.run(adjacency, pattern, walks, Goal::Count)?;
        let count = match outcome {
            Outcome::Count(count) => count,
            Outcome::Tuples(values) => values.len() / pattern.size(),
            Outcome::Empty => 0,
        };
        Ok(MatchCount { count, stats })
    }

    fn run(
        &self,
        adjacency: &Adjacency,
        pattern: &Pattern,
        walks: WalkTable,
        goal: Goal,
    ) -> Result<(Outcome, EnumerationStats)> {
        let started = Instant::now();
        let k = pattern.size();
        let mut stats = self.empty_stats();

        let mut state = State::Level {
            position: walks.arity(),
            walks,
        };
        let outcome = loop {
            state = match state {
                State::Level { position, walks } if position >= k => match goal {
                    Goal::Tuples => State::Extract { walks },
                    Goal::Count => State::Done(Outcome::Count(walks.row_count())),
                },
                State::Level { position, walks } => {
                    self.level(adjacency, pattern, position, &walks, goal, &mut stats)?
                }
                State::Extract { walks } => State::Done(Outcome::Tuples(self.extract(&walks)?)),
                State::Done(outcome) => break outcome,
            };
        };

        stats.total = started.elapsed();
        info!(
            pattern_size = k,
            threads = stats.threads,
            levels = stats.levels.len(),
            matches = match &outcome {
                Outcome::Empty => 0,
                Outcome::Tuples(values) => values.len() / k,
                Outcome::Count(count) => *count,
            },
            elapsed_us = stats.total.as_micros(),
            "enumeration finished"
        );
        Ok((outcome, stats))
    }

    /// One `Level(position)` step. `walks` is `R[position - 1]`; it is
    /// released by the caller once the returned state owns `R[position]`.
    fn level(
        &self,
        adjacency: &Adjacency,
        pattern: &Pattern,
        position: usize,
        walks: &WalkTable,
        goal: Goal,
        stats: &mut EnumerationStats,
    ) -> Result<State> {
        let generator = CandidateGenerator::new(
            adjacency,
            pattern.required(position),
            self.config.mask_mode,
            self.config.strategy,
        )?;
        let partitions = partition_rows(walks.row_count(), self.pool.threads());

        let t = Instant::now();
        let buffers = map_partitions(&self.pool, &partitions, |row, scratch: &mut Scratch, out| {
            generator.generate(walks.walk(row), scratch, out)
        })?;
        let nnz: usize = buffers.iter().map(PartitionBuffer::nnz).sum();
        let mut level = LevelStats {
            position,
            walks: walks.row_count(),
            candidates: nnz,
            map: t.elapsed(),
            ..LevelStats::default()
        };

        if nnz == 0 {
            debug!(level = position, walks = level.walks, "no candidates, enumeration exhausted");
            stats.levels.push(level);
            return Ok(State::Done(Outcome::Empty));
        }
        if goal == Goal::Count && position + 1 == pattern.size() {
            debug!(level = position, walks = level.walks, candidates = nnz, "counted final level");
            stats.levels.push(level);
            return Ok(State::Done(Outcome::Count(nnz)));
        }

        let t = Instant::now();
        let candidates = merge_partitions(&self.pool, &buffers)?;
        drop(buffers);
        level.merge = t.elapsed();

        let t = Instant::now();
        let next = materialize(&self.pool, &partitions, walks, &candidates)?;
        level.materialize = t.elapsed();

        debug!(
            level = position,
            walks = level.walks,
            candidates = nnz,
            map_us = level.map.as_micros(),
            merge_us = level.merge.as_micros(),
            materialize_us = level.materialize.as_micros(),
            "level complete"
        );
        stats.levels.push(level);
        Ok(State::Level {
            position: position + 1,
            walks: next,
        })
    }

    /// Reorders every row of the final table into canonical position order.
    fn extract(&self, walks: &WalkTable) -> Result<Vec<usize>> {
        let k = walks.arity();
        let total = checked_mul(walks.row_count(), k, "tuple relation")?;
        let mut values = try_filled(total, 0usize)?;
        if total > 0 {
            self.pool.install(|| {
                values
                    .par_chunks_mut(k)
                    .enumerate()
                    .for_each(|(row, out)| walks.walk(row).write_canonical(out));
            });
        }
        Ok(values)
    }
}
