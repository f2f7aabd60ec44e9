//! # Generation Update Passes
//!
//! One generation of Conway's Game of Life is computed in two strictly separate
//! passes over the grid:
//!
//! 1. **Neighbor counting**: for every cell, the number of `Alive` cells among
//!    its 8 toroidal neighbors is written into a same-shaped count buffer.
//! 2. **Rule application**: every cell is overwritten in place with its next
//!    state, computed from its current state and its count.
//!
//! The second pass may only start once the first has finished for every row it
//! reads, because it overwrites generation `N` with generation `N + 1`.
//!
//! Both passes operate on *row ranges*: a contiguous block of rows and the
//! matching block of the count buffer. A sequential run hands the whole grid to
//! each pass, a row-sliced run hands each worker its own block (see
//! [`crate::strategy`]).
//!
//! ## Rules
//!
//! - **Birth**: a dead cell with exactly 3 neighbors becomes alive
//! - **Survival**: a live cell with 2 or 3 neighbors stays alive
//! - **Death**: every other cell is dead in the next generation

use crate::grid::{CellState, Grid};

/// Returns the next state of a cell with `neighbors` live neighbors.
///
/// This is the branch-free form `(n == 3) | (alive & n == 2)`. It agrees with the
/// textual birth/survival rule because `alive` comes from a [`CellState`], whose
/// discriminants are exactly `0` and `1`.
#[inline]
pub fn next_state(state: CellState, neighbors: u8) -> CellState {
    CellState::from((neighbors == 3) | (state.is_alive() & (neighbors == 2)))
}

/// Counts live neighbors of `(x, y)` by wrapping every one of the 8 offsets.
///
/// This is the straightforward reference for [`count_rows`]; it pays a modulo on
/// every lookup and is only meant for checking the optimized pass.
pub fn wrapped_neighbor_count(grid: &Grid, x: isize, y: isize) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx != 0 || dy != 0 {
                count += grid.get(x + dx, y + dy) as u8;
            }
        }
    }
    count
}

/// Computes the neighbor counts of row `y` into `counts`.
///
/// Only the row above and below need a wrap check. Inside the row, the first and
/// last column are handled separately so that the interior loop uses plain
/// `x - 1` / `x + 1` offsets.
///
/// # Arguments
///
/// * `grid` - The grid as of the start of the generation
/// * `y` - Row index in `0..height`
/// * `counts` - Exactly `width` entries, fully overwritten
pub fn count_row(grid: &Grid, y: usize, counts: &mut [u8]) {
    let (width, height) = grid.dimensions();
    debug_assert_eq!(counts.len(), width);

    let up = if y == 0 { height - 1 } else { y - 1 };
    let down = if y + 1 == height { 0 } else { y + 1 };

    let above = grid.row(up);
    let here = grid.row(y);
    let below = grid.row(down);

    let sum = |left: usize, x: usize, right: usize| -> u8 {
        above[left] as u8
            + above[x] as u8
            + above[right] as u8
            + here[left] as u8
            + here[right] as u8
            + below[left] as u8
            + below[x] as u8
            + below[right] as u8
    };

    if width == 1 {
        // Every neighbor aliases the single column.
        counts[0] = sum(0, 0, 0);
        return;
    }

    let last = width - 1;
    counts[0] = sum(last, 0, 1);
    for x in 1..last {
        counts[x] = sum(x - 1, x, x + 1);
    }
    counts[last] = sum(last - 1, last, 0);
}

/// Neighbor-count pass over a contiguous block of rows starting at `first_row`.
///
/// `counts` covers the block in row-major order, so its length must be a
/// multiple of the grid width. The grid is only read.
pub fn count_rows(grid: &Grid, first_row: usize, counts: &mut [u8]) {
    let width = grid.width();
    for (offset, row_counts) in counts.chunks_exact_mut(width).enumerate() {
        count_row(grid, first_row + offset, row_counts);
    }
}

/// Rule-application pass over a block of cells and their counts.
///
/// `cells` and `counts` must describe the same rows. Every count has to be
/// computed from the previous generation before this runs.
pub fn apply_rules(cells: &mut [CellState], counts: &[u8]) {
    debug_assert_eq!(cells.len(), counts.len());
    for (cell, &neighbors) in cells.iter_mut().zip(counts) {
        *cell = next_state(*cell, neighbors);
    }
}
