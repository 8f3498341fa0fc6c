//! Enumeration configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::candidate::{CandidateStrategy, MaskMode};

/// Knobs fixed for the lifetime of one [`Enumerator`](crate::Enumerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EnumerationConfig {
    /// Worker count and partition count. `0` means available hardware
    /// parallelism.
    pub num_threads: usize,

    /// Whether a walk may reuse a vertex it already holds.
    pub mask_mode: MaskMode,

    /// How candidate sets are computed.
    pub strategy: CandidateStrategy,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            mask_mode: MaskMode::ExcludeVisited,
            strategy: CandidateStrategy::Intersect,
        }
    }
}

impl EnumerationConfig {
    /// Sets the worker count (`0` = hardware parallelism).
    #[must_use]
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Sets the mask mode.
    #[must_use]
    pub fn with_mask_mode(mut self, mask_mode: MaskMode) -> Self {
        self.mask_mode = mask_mode;
        self
    }

    /// Sets the candidate strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: CandidateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The concrete worker count, always at least one.
    pub fn resolved_threads(&self) -> usize {
        if self.num_threads != 0 {
            return self.num_threads;
        }
        std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }
}
