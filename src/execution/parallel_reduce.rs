use std::{num::NonZeroUsize, ops::Range, thread};

use log::trace;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{data::partition, error::Result};

/// Fork/join over a fixed partition of a row index space.
///
/// Every call to `run` maps each non-empty range to a local result on a
/// dedicated pool, hands every result to a combine step and only returns once
/// all of them have been combined. A range is a task, not a thread: the pool
/// never grows past the available parallelism. The return of `run` is the barrier: nothing
/// started by it is still running afterwards.
#[derive(Debug)]
pub struct ParallelReduce {
    pool: ThreadPool,
    ranges: Vec<Range<usize>>,
}

impl ParallelReduce {
    /// Creates a new `ParallelReduce`.
    ///
    /// # Arguments
    /// * `rows` - The size of the index space, `[0, rows)`.
    /// * `num_workers` - The requested amount of workers, capped at `rows` since
    ///   ranges past it would be empty.
    ///
    /// # Returns
    /// A new instance or `MlErr::ThreadPool` if the worker threads can't be spawned.
    pub fn new(rows: usize, num_workers: NonZeroUsize) -> Result<Self> {
        let ranges: Vec<_> = partition(rows, num_workers.get().min(rows))
            .into_iter()
            .filter(|range| !range.is_empty())
            .collect();

        let cores = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let pool = ThreadPoolBuilder::new()
            .num_threads(ranges.len().clamp(1, cores))
            .thread_name(|i| format!("grad-worker-{i}"))
            .build()?;

        trace!(
            requested = num_workers.get(),
            effective = ranges.len(),
            threads = pool.current_num_threads();
            "worker pool ready"
        );
        Ok(Self { pool, ranges })
    }

    /// The amount of threads backing the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The non-empty ranges, one per worker.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Runs one fork/join cycle.
    ///
    /// # Arguments
    /// * `map` - Computes a worker's local result over its range. Must not touch shared state.
    /// * `combine` - Folds a local result into the shared one, it's responsible for its own exclusion.
    ///
    /// # Returns
    /// The first error produced by either closure. Once an error is observed no
    /// further ranges are dispatched, ranges already running are still awaited.
    pub fn run<T, E, M, C>(&self, map: M, combine: C) -> std::result::Result<(), E>
    where
        T: Send,
        E: Send,
        M: Fn(Range<usize>) -> std::result::Result<T, E> + Sync,
        C: Fn(T) -> std::result::Result<(), E> + Sync,
    {
        self.pool.install(|| {
            self.ranges
                .par_iter()
                .cloned()
                .try_for_each(|range| combine(map(range)?))
        })
    }
}
