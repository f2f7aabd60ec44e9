//! All kinds of errors in this crate.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// Every variant is fatal and is raised before the first generation runs. Once a
/// [`GenerationDriver`](crate::driver::GenerationDriver) exists, nothing can fail.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Grid dimensions must be positive, got {width}x{height}.
    InvalidDimensions { width: i64, height: i64 },
    /// Malformed input on line {line}: {reason}.
    MalformedInput { line: usize, reason: String },
    /// Invalid configuration: {0}.
    InvalidConfiguration(String),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
