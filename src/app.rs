//! One complete run: load the grid, compute the generations, write the result.

use tracing::info;

use crate::{
    args::Config,
    driver::GenerationDriver,
    field::{export_field, import_field},
    grid::Grid,
    timing::{Phase, PhaseObserver},
};

/// Runs the simulation described by `config`, notifying `observer` at each phase
/// boundary, and returns the final grid.
///
/// File I/O happens only in the setup and finalization phases, on the calling
/// thread. In parallel mode the worker pool is started during setup, runs
/// generations only in the computation phase, and is shut down during
/// finalization when the driver hands back the grid.
///
/// # Errors
///
/// Fails during setup if the input cannot be read or parsed or the worker pool
/// cannot be started, and during finalization if the output cannot be written.
/// Nothing is written when setup fails.
pub fn run(config: &Config, observer: &mut dyn PhaseObserver) -> anyhow::Result<Grid> {
    observer.phase_started(Phase::Setup);
    let grid = import_field(&config.input, config.symbols)?;
    let strategy = config.mode.strategy(config.workers)?;
    let mut driver = GenerationDriver::new(grid, strategy, config.generations);
    observer.phase_finished(Phase::Setup);

    observer.phase_started(Phase::Computation);
    driver.run();
    observer.phase_finished(Phase::Computation);

    observer.phase_started(Phase::Finalization);
    let grid = driver.into_grid();
    export_field(&config.output, &grid, config.symbols)?;
    observer.phase_finished(Phase::Finalization);

    info!(output = %config.output.display(), "result written");
    Ok(grid)
}
