//! # Command Line Arguments and Run Configuration
//!
//! This module turns the command line into a validated [`Config`] for one run.
//! It handles:
//!
//! - Parsing the input and output paths, generation count and execution mode
//! - Choosing the worker count for parallel runs
//! - Rejecting unsupported settings before any file is opened
//!
//! ## Example Usage
//!
//! ```no_run
//! use clap::Parser;
//! use gol_torus::args::Args;
//!
//! let config = Args::parse().config()?;
//! # Ok::<(), gol_torus::Error>(())
//! ```

use std::{
    ffi::OsString,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use clap::Parser;

use crate::{error::Error, field::Symbols, strategy::ExecutionMode};

/// Generations computed when `--generations` is not given.
pub const DEFAULT_GENERATIONS: i64 = 250;

/// Command line arguments for a Game of Life run on a toroidal grid.
///
/// ## Examples
///
/// ```bash
/// # 250 generations of random10000_in.gol, written to random10000_out.gol
/// gol-torus
///
/// # 1000 generations on 8 workers
/// gol-torus -i glider_in.gol -n 1000 -m parallel -w 8
///
/// # Explicit output file and phase timings
/// gol-torus -i glider_in.gol -o result.gol --timing
/// ```
#[derive(Parser, Debug)]
#[command(version, about = "Conway's Game of Life on a toroidal grid")]
pub struct Args {
    /// File path of the initial grid
    ///
    /// The first line is `width,height`, followed by `height` rows of exactly
    /// `width` cell symbols each.
    #[arg(short = 'i', long, default_value = "random10000_in.gol")]
    pub input_file: PathBuf,

    /// File path for the final grid
    ///
    /// Defaults to the input path with `_in.gol` replaced by `_out.gol`, or with
    /// `.out` appended when the input does not end in `_in.gol`.
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Number of generations to compute
    #[arg(short = 'n', long, default_value_t = DEFAULT_GENERATIONS, allow_negative_numbers = true)]
    pub generations: i64,

    /// Execution mode: `sequential` or `parallel`
    #[arg(short = 'm', long, default_value = "sequential")]
    pub mode: String,

    /// Number of worker threads in parallel mode
    ///
    /// Defaults to the available parallelism of the host.
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Symbol representing alive cells
    #[arg(short = 'a', long, default_value = "x")]
    pub alive_symbol: char,

    /// Symbol representing dead cells
    #[arg(short = 'd', long, default_value = ".")]
    pub dead_symbol: char,

    /// Print the time spent in each phase after the run
    #[arg(short = 't', long)]
    pub timing: bool,
}

/// Validated settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub generations: u64,
    pub mode: ExecutionMode,
    /// Always 1 in sequential mode.
    pub workers: usize,
    pub symbols: Symbols,
    pub timing: bool,
}

impl Args {
    /// Validates the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an unsupported mode, a
    /// negative generation count, a worker count below 1 in parallel mode, or
    /// identical alive and dead symbols.
    pub fn config(&self) -> Result<Config, Error> {
        let mode: ExecutionMode = self.mode.parse()?;

        let generations = u64::try_from(self.generations).map_err(|_| {
            Error::InvalidConfiguration(format!(
                "generation count must not be negative, got {}",
                self.generations
            ))
        })?;

        let workers = match (mode, self.workers) {
            (ExecutionMode::Sequential, _) => 1,
            (ExecutionMode::Parallel, Some(workers)) if workers >= 1 => workers as usize,
            (ExecutionMode::Parallel, Some(workers)) => {
                return Err(Error::InvalidConfiguration(format!(
                    "parallel mode needs at least one worker, got {workers}"
                )));
            }
            (ExecutionMode::Parallel, None) => thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        };

        if self.alive_symbol == self.dead_symbol {
            return Err(Error::InvalidConfiguration(format!(
                "alive and dead symbols must differ, both are {:?}",
                self.alive_symbol
            )));
        }

        let output = self
            .output_file
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input_file));

        Ok(Config {
            input: self.input_file.clone(),
            output,
            generations,
            mode,
            workers,
            symbols: Symbols {
                alive: self.alive_symbol,
                dead: self.dead_symbol,
            },
            timing: self.timing,
        })
    }
}

/// `foo_in.gol` becomes `foo_out.gol`; any other name gets `.out` appended.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input.file_name().map(|name| name.to_string_lossy());
    match name.as_deref().and_then(|name| name.strip_suffix("_in.gol")) {
        Some(stem) => input.with_file_name(format!("{stem}_out.gol")),
        None => {
            let mut name = input.file_name().map(OsString::from).unwrap_or_default();
            name.push(".out");
            input.with_file_name(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gol-torus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_follow_the_classic_benchmark() {
        let config = parse(&[]).config().unwrap();
        assert_eq!(config.input, PathBuf::from("random10000_in.gol"));
        assert_eq!(config.output, PathBuf::from("random10000_out.gol"));
        assert_eq!(config.generations, 250);
        assert_eq!(config.mode, ExecutionMode::Sequential);
        assert_eq!(config.workers, 1);
        assert_eq!(config.symbols, Symbols::default());
        assert!(!config.timing);
    }

    #[test]
    fn parallel_with_explicit_workers() {
        let config = parse(&["-m", "parallel", "-w", "6", "-n", "0", "-t"])
            .config()
            .unwrap();
        assert_eq!(config.mode, ExecutionMode::Parallel);
        assert_eq!(config.workers, 6);
        assert_eq!(config.generations, 0);
        assert!(config.timing);
    }

    #[test]
    fn parallel_without_workers_uses_host_parallelism() {
        let config = parse(&["--mode", "parallel"]).config().unwrap();
        assert!(config.workers >= 1);
    }

    #[test]
    fn invalid_settings_are_configuration_errors() {
        for args in [
            &["-m", "gpu"][..],
            &["-n", "-1"][..],
            &["-m", "parallel", "-w", "0"][..],
            &["-m", "parallel", "-w", "-3"][..],
            &["-a", "o", "-d", "o"][..],
        ] {
            assert!(
                matches!(parse(args).config(), Err(Error::InvalidConfiguration(_))),
                "{args:?}"
            );
        }
    }

    #[test]
    fn worker_count_is_ignored_in_sequential_mode() {
        let config = parse(&["-w", "0"]).config().unwrap();
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn output_path_derivation() {
        assert_eq!(
            default_output_path(Path::new("data/glider_in.gol")),
            PathBuf::from("data/glider_out.gol")
        );
        assert_eq!(
            default_output_path(Path::new("glider.txt")),
            PathBuf::from("glider.txt.out")
        );
    }
}
