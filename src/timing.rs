//! Phase timing for a single run.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// The three phases of a run, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reading and validating the input grid.
    Setup,
    /// The generation loop.
    Computation,
    /// Writing the final grid.
    Finalization,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Setup, Phase::Computation, Phase::Finalization];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Phase::Setup => "setup",
            Phase::Computation => "computation",
            Phase::Finalization => "finalization",
        })
    }
}

/// Notified at every phase boundary of a run. Purely for reporting; nothing in
/// the computation depends on it.
pub trait PhaseObserver {
    fn phase_started(&mut self, phase: Phase);

    fn phase_finished(&mut self, phase: Phase);
}

/// Ignores every notification.
impl PhaseObserver for () {
    fn phase_started(&mut self, _phase: Phase) {}

    fn phase_finished(&mut self, _phase: Phase) {}
}

/// Records the wall-clock time spent in each phase.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    started: [Option<Instant>; 3],
    elapsed: [Option<Duration>; 3],
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time of a finished phase.
    pub fn elapsed(&self, phase: Phase) -> Option<Duration> {
        self.elapsed[phase.index()]
    }

    /// Sum of all finished phases.
    pub fn total(&self) -> Duration {
        self.elapsed.iter().flatten().sum()
    }
}

impl PhaseObserver for Stopwatch {
    fn phase_started(&mut self, phase: Phase) {
        self.started[phase.index()] = Some(Instant::now());
    }

    fn phase_finished(&mut self, phase: Phase) {
        if let Some(start) = self.started[phase.index()].take() {
            self.elapsed[phase.index()] = Some(start.elapsed());
        }
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for phase in Phase::ALL {
            match self.elapsed(phase) {
                Some(elapsed) => writeln!(f, "{:<13}{:>12.6}s", phase, elapsed.as_secs_f64())?,
                None => writeln!(f, "{:<13}{:>13}", phase, "-")?,
            }
        }
        write!(f, "{:<13}{:>12.6}s", "total", self.total().as_secs_f64())
    }
}
