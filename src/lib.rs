//! Conway's Game of Life on a fixed-size toroidal grid.
//!
//! A [`Grid`] is advanced generation by generation by a
//! [`GenerationDriver`](driver::GenerationDriver). Each generation is a
//! neighbor-count pass followed by a rule-application pass (see [`model`]),
//! scheduled either sequentially or row-sliced across a worker pool (see
//! [`strategy`]).

pub mod app;
pub mod args;
pub mod driver;
mod error;
pub mod field;
pub mod grid;
pub mod model;
pub mod strategy;
pub mod timing;

pub use driver::{DriverState, GenerationDriver};
pub use error::Error;
pub use grid::{CellState, Grid};
pub use strategy::{ExecutionMode, RowSliced, Sequential, UpdateStrategy};
