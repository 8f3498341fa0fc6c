//! Fork–join execution on a fixed-size worker pool.
//!
//! Each enumeration level is a sequence of structured parallel regions: every
//! region hands one task per partition to the pool and returns only when all
//! of them have finished. Tasks own disjoint inputs and outputs, so no locks
//! are involved.

pub mod scoped;

pub use scoped::WorkerPool;
