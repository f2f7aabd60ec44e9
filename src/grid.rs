//! # Toroidal Grid Storage
//!
//! A [`Grid`] is a dense, fixed-size rectangle of [`CellState`]s stored in one
//! contiguous buffer indexed by `row * width + col`. All public coordinate
//! accessors wrap modulo the dimensions, so the grid behaves like the surface of
//! a torus: the last column is adjacent to the first and the last row to the
//! first.
//!
//! Rows are exposed as slices ([`Grid::row`], [`Grid::rows`],
//! [`Grid::cells_mut`]) so the update passes in [`crate::model`] can work on
//! whole rows without re-normalizing coordinates for every cell.

use crate::error::Error;

/// State of a single cell.
///
/// The discriminants are fixed to `0` and `1`, so `state as u8` is always a valid
/// term in a neighbor sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Number of cells in a `width` by `height` grid.
///
/// Both dimensions must be positive and the product must be addressable as an
/// `isize`, which is the limit of a `Vec<CellState>`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize, Error> {
    let invalid = || Error::InvalidDimensions {
        width: i64::try_from(width).unwrap_or(i64::MAX),
        height: i64::try_from(height).unwrap_or(i64::MAX),
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    width
        .checked_mul(height)
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or_else(invalid)
}

/// Dense two-dimensional cell storage with toroidal coordinates.
///
/// The dimensions are fixed at construction and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates an all-`Dead` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero or
    /// the cell count does not fit in memory.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let len = cell_count(width, height)?;
        Self::from_cells(width, height, vec![CellState::Dead; len])
    }

    /// Creates a grid from cells in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or the
    /// cell count does not fit in memory, and [`Error::MalformedInput`] if
    /// `cells` does not hold exactly `width * height` entries.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellState>) -> Result<Self, Error> {
        let len = cell_count(width, height)?;
        if cells.len() != len {
            return Err(Error::malformed(
                0,
                format!(
                    "expected {len} cells for a {width}x{height} grid, got {}",
                    cells.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Get grid dimensions as `(width, height)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> usize {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        y * self.width + x
    }

    /// Returns the state at `(x mod width, y mod height)`.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> CellState {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: isize, y: isize, state: CellState) {
        let idx = self.index(x, y);
        self.cells[idx] = state;
    }

    #[inline]
    pub fn set_alive(&mut self, x: isize, y: isize) {
        self.set(x, y, CellState::Alive);
    }

    #[inline]
    pub fn set_dead(&mut self, x: isize, y: isize) {
        self.set(x, y, CellState::Dead);
    }

    /// Row `y` as a slice. `y` must already be in `0..height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[CellState] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Mutable view of all cells in row-major order.
    pub fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Number of `Alive` cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(matches!(
            Grid::new(3, 0),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::from_cells(usize::MAX / 2 + 1, 2, Vec::new()),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(isize::MAX as usize, 2),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(5, 3).unwrap();
        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn coordinates_wrap_in_both_directions() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set_alive(-1, -1);
        assert_eq!(grid.get(3, 2), CellState::Alive);
        assert_eq!(grid.get(7, 5), CellState::Alive);
        assert_eq!(grid.get(-5, -4), CellState::Alive);

        grid.set_dead(3, 2);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn storage_is_row_major() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 0, CellState::Alive);
        grid.set(0, 1, CellState::Alive);
        assert_eq!(
            grid.row(0),
            &[CellState::Dead, CellState::Dead, CellState::Alive]
        );
        assert_eq!(grid.cells()[3], CellState::Alive);
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(matches!(
            Grid::from_cells(2, 2, vec![CellState::Dead; 3]),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn cell_state_discriminants_are_zero_and_one() {
        assert_eq!(CellState::Dead as u8, 0);
        assert_eq!(CellState::Alive as u8, 1);
        assert_eq!(CellState::from(true), CellState::Alive);
    }
}
