//! The generation loop.

use tracing::{debug, info, trace};

use crate::{grid::Grid, strategy::UpdateStrategy};

/// Lifecycle of a [`GenerationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Created, no generation computed yet.
    Idle,
    /// At least one generation computed, more to go.
    Running,
    /// The configured number of generations has been reached.
    Done,
}

/// Owns the grid and the scratch count buffer for one run and advances the grid
/// a fixed number of generations with the chosen [`UpdateStrategy`].
pub struct GenerationDriver {
    grid: Grid,
    counts: Vec<u8>,
    strategy: Box<dyn UpdateStrategy>,
    generation: u64,
    total: u64,
    state: DriverState,
}

impl GenerationDriver {
    /// A driver configured for `total` generations. `total == 0` is legal; the
    /// driver then starts out `Done` and never touches the grid.
    pub fn new(grid: Grid, strategy: Box<dyn UpdateStrategy>, total: u64) -> Self {
        // Allocated once; every generation overwrites it before reading.
        let counts = vec![0; grid.cells().len()];
        let state = if total == 0 {
            DriverState::Done
        } else {
            DriverState::Idle
        };
        Self {
            grid,
            counts,
            strategy,
            generation: 0,
            total,
            state,
        }
    }

    /// Computes one generation. Returns `false` without doing anything once the
    /// driver is `Done`.
    pub fn step(&mut self) -> bool {
        if self.state == DriverState::Done {
            return false;
        }
        self.state = DriverState::Running;
        self.strategy.generation(&mut self.grid, &mut self.counts);
        self.generation += 1;
        trace!(generation = self.generation, "generation complete");
        if self.generation == self.total {
            self.state = DriverState::Done;
        }
        true
    }

    /// Runs all remaining generations.
    pub fn run(&mut self) -> &Grid {
        let (width, height) = self.grid.dimensions();
        info!(
            width,
            height,
            generations = self.total(),
            mode = %self.strategy.mode(),
            population = self.grid.population(),
            "starting run"
        );
        while self.step() {}
        debug!(
            generation = self.generation,
            population = self.grid.population(),
            "run finished"
        );
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Gives the grid back, ending the run.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
