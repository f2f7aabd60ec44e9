//! Execution modes for a single generation.
//!
//! An [`UpdateStrategy`] is picked once from the configured [`ExecutionMode`]
//! and then used for every generation of a run. Both implementations produce
//! bit-identical grids; they differ only in how rows are scheduled.

use std::{fmt, str::FromStr};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::debug;

use crate::{
    error::Error,
    grid::Grid,
    model::{apply_rules, count_rows},
};

/// How the rows of a generation are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One thread of control, rows in increasing order.
    #[default]
    Sequential,
    /// Rows split into contiguous slices across a fixed pool of workers.
    Parallel,
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            other => Err(Error::InvalidConfiguration(format!(
                "unsupported execution mode {other:?}, expected \"sequential\" or \"parallel\""
            ))),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Parallel => f.write_str("parallel"),
        }
    }
}

impl ExecutionMode {
    /// Builds the strategy for this mode.
    ///
    /// `workers` is ignored in sequential mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if parallel mode is requested with
    /// zero workers or the worker pool cannot be started.
    pub fn strategy(self, workers: usize) -> Result<Box<dyn UpdateStrategy>, Error> {
        match self {
            ExecutionMode::Sequential => Ok(Box::new(Sequential)),
            ExecutionMode::Parallel => Ok(Box::new(RowSliced::new(workers)?)),
        }
    }
}

/// Computes one generation: the neighbor-count pass over the whole grid, then
/// the rule-application pass.
///
/// `counts` has one entry per cell. Its contents on entry are ignored and it is
/// fully overwritten before it is read.
pub trait UpdateStrategy: Send + Sync {
    fn generation(&self, grid: &mut Grid, counts: &mut [u8]);

    fn mode(&self) -> ExecutionMode;
}

/// Single-threaded strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl UpdateStrategy for Sequential {
    fn generation(&self, grid: &mut Grid, counts: &mut [u8]) {
        count_rows(grid, 0, counts);
        apply_rules(grid.cells_mut(), counts);
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

/// Row-sliced strategy backed by a dedicated rayon pool.
///
/// Each worker owns one contiguous range of rows in both the grid and the count
/// buffer, so no locking is needed. Returning from the parallel iterator is the
/// barrier between the two passes, and between generations.
pub struct RowSliced {
    pool: ThreadPool,
    workers: usize,
}

impl RowSliced {
    /// Starts a pool with exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self, Error> {
        if workers == 0 {
            return Err(Error::InvalidConfiguration(
                "parallel mode needs at least one worker".into(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gol-worker-{i}"))
            .build()
            .map_err(|err| {
                Error::InvalidConfiguration(format!("failed to start {workers} workers: {err}"))
            })?;
        debug!(workers, "started row-sliced worker pool");
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of rows in each slice; the last slice may be shorter.
    fn rows_per_slice(&self, height: usize) -> usize {
        height.div_ceil(self.workers())
    }
}

impl fmt::Debug for RowSliced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSliced")
            .field("workers", &self.workers)
            .finish()
    }
}

impl UpdateStrategy for RowSliced {
    fn generation(&self, grid: &mut Grid, counts: &mut [u8]) {
        let (width, height) = grid.dimensions();
        let rows = self.rows_per_slice(height);
        let slice_len = rows * width;

        self.pool.install(|| {
            let source: &Grid = grid;
            counts
                .par_chunks_mut(slice_len)
                .enumerate()
                .for_each(|(slice, block)| count_rows(source, slice * rows, block));

            let counts: &[u8] = counts;
            grid.cells_mut()
                .par_chunks_mut(slice_len)
                .zip(counts.par_chunks(slice_len))
                .for_each(|(cells, block)| apply_rules(cells, block));
        });
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
