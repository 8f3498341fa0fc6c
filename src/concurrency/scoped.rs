//! Scoped fork–join helpers over a `rayon` thread pool.
//!
//! The pattern is compute-then-commit: a parallel **compute phase** in which
//! every task reads shared state and owns its private output, followed by a
//! sequential **commit phase** performed by the caller on the returned
//! results. Tasks may borrow from the caller's stack; the region joins before
//! returning, which is the barrier between phases.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// A worker pool whose size is fixed at construction.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Starts a pool with `threads` workers (at least one).
    ///
    /// # Errors
    /// Returns `WorkerPool` if the OS refuses to spawn the threads.
    pub fn new(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("walkjoin-worker-{i}"))
            .build()?;
        Ok(Self { pool, threads })
    }

    /// Number of workers.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `compute(index, task)` for every task concurrently and returns the
    /// results in task order once all of them have completed.
    ///
    /// A panic in any task is resumed on the caller after the join.
    pub fn fork_join<T, W, F>(&self, tasks: Vec<T>, compute: F) -> Vec<W>
    where
        T: Send,
        W: Send,
        F: Fn(usize, T) -> W + Sync,
    {
        let n = tasks.len();
        if n == 1 {
            // No point paying for a hop onto the pool.
            return tasks.into_iter().map(|t| compute(0, t)).collect();
        }

        let mut slots: Vec<Option<W>> = (0..n).map(|_| None).collect();
        self.pool.scope(|scope| {
            let compute = &compute;
            for ((tid, task), slot) in tasks.into_iter().enumerate().zip(slots.iter_mut()) {
                scope.spawn(move |_| *slot = Some(compute(tid, task)));
            }
        });

        let out: Vec<W> = slots.into_iter().flatten().collect();
        debug_assert_eq!(out.len(), n, "every task writes its slot before the join");
        out
    }

    /// Runs `op` inside the pool so that `rayon` parallel iterators use its
    /// workers.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.pool.install(op)
    }
}
