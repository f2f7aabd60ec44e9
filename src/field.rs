//! # Grid Files
//!
//! Reading and writing grids in the plain-text `.gol` format:
//!
//! ```text
//! 5,3
//! .....
//! .xxx.
//! .....
//! ```
//!
//! The first line is `width,height`. Exactly `height` rows follow, each holding
//! exactly `width` symbols: one symbol for alive cells and one for dead cells
//! (`x` and `.` by default, see [`Symbols`]).

use std::{
    fmt::Write as _,
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use tracing::debug;

use crate::{
    error::Error,
    grid::{CellState, Grid, cell_count},
};

/// The two characters used for cell states in a grid file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub alive: char,
    pub dead: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            alive: 'x',
            dead: '.',
        }
    }
}

impl Symbols {
    #[inline]
    fn state(&self, symbol: char) -> Option<CellState> {
        if symbol == self.alive {
            Some(CellState::Alive)
        } else if symbol == self.dead {
            Some(CellState::Dead)
        } else {
            None
        }
    }

    #[inline]
    fn symbol(&self, state: CellState) -> char {
        match state {
            CellState::Alive => self.alive,
            CellState::Dead => self.dead,
        }
    }
}

fn parse_dimension(field: Option<&str>, name: &str) -> Result<i64, Error> {
    let field = field.map(str::trim).unwrap_or_default();
    field
        .parse()
        .map_err(|_| Error::malformed(1, format!("{name} {field:?} is not an integer")))
}

/// Parses a grid from the contents of a grid file.
///
/// Lines after the last row are ignored. A trailing `\r` on any line is
/// stripped, so files with Windows line endings are accepted.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if the header is not `width,height`, a row is
///   missing, a row does not hold exactly `width` symbols, or a symbol is
///   neither the alive nor the dead symbol. `line` is 1-based.
/// - [`Error::InvalidDimensions`] if either dimension is zero or negative, or
///   the cell count does not fit in memory.
pub fn parse_field(content: &str, symbols: Symbols) -> Result<Grid, Error> {
    let mut lines = content.lines().map(|line| line.trim_end_matches('\r'));

    let header = lines
        .next()
        .ok_or_else(|| Error::malformed(1, "missing \"width,height\" header"))?;
    let mut fields = header.split(',');
    let width = parse_dimension(fields.next(), "width")?;
    let height = parse_dimension(fields.next(), "height")?;
    if fields.next().is_some() {
        return Err(Error::malformed(
            1,
            format!("expected \"width,height\", got {header:?}"),
        ));
    }
    let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height)) else {
        return Err(Error::InvalidDimensions { width, height });
    };
    let len = cell_count(width, height)?;

    // Every cell takes at least one byte of input, so a header larger than the
    // content is caught as a missing row instead of sized up front.
    let mut cells = Vec::with_capacity(len.min(content.len()));
    for y in 0..height {
        let line_no = y + 2;
        let line = lines
            .next()
            .ok_or_else(|| Error::malformed(line_no, format!("expected {height} rows, got {y}")))?;

        let row_start = cells.len();
        for (x, symbol) in line.chars().enumerate() {
            if x == width {
                return Err(Error::malformed(
                    line_no,
                    format!("row is longer than the width {width}"),
                ));
            }
            let state = symbols.state(symbol).ok_or_else(|| {
                Error::malformed(line_no, format!("unexpected symbol {symbol:?} in column {x}"))
            })?;
            cells.push(state);
        }
        let len = cells.len() - row_start;
        if len < width {
            return Err(Error::malformed(
                line_no,
                format!("row has {len} cells, expected {width}"),
            ));
        }
    }

    Grid::from_cells(width, height, cells)
}

/// Reads and parses a grid file.
///
/// # Errors
///
/// Fails if the file cannot be read or its contents are rejected by
/// [`parse_field`].
pub fn import_field(path: &Path, symbols: Symbols) -> anyhow::Result<Grid> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    let grid = parse_field(&content, symbols)
        .with_context(|| format!("invalid grid file {}", path.display()))?;
    let (width, height) = grid.dimensions();
    debug!(path = %path.display(), width, height, "loaded grid");
    Ok(grid)
}

/// Renders a grid in the file format, header included.
pub fn convert_to_string(grid: &Grid, symbols: Symbols) -> String {
    let (width, height) = grid.dimensions();
    let mut result = String::with_capacity(24 + grid.cells().len() + height);
    // Writing into a `String` cannot fail.
    let _ = writeln!(result, "{width},{height}");
    for row in grid.rows() {
        result.extend(row.iter().map(|&state| symbols.symbol(state)));
        result.push('\n');
    }
    result
}

/// Writes a grid in the file format to `out`.
pub fn write_field(out: &mut impl Write, grid: &Grid, symbols: Symbols) -> io::Result<()> {
    out.write_all(convert_to_string(grid, symbols).as_bytes())?;
    out.flush()
}

/// Writes a grid to `path`, replacing any existing file.
pub fn export_field(path: &Path, grid: &Grid, symbols: Symbols) -> anyhow::Result<()> {
    let mut file = io::BufWriter::new(
        fs::File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?,
    );
    write_field(&mut file, grid, symbols)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    debug!(path = %path.display(), "wrote grid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_row_major_order() {
        let grid = parse_field("3,2\nx..\n..x\n", Symbols::default()).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.get(0, 0), CellState::Alive);
        assert_eq!(grid.get(2, 1), CellState::Alive);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn accepts_crlf_and_header_whitespace() {
        let grid = parse_field(" 2 , 1 \r\nx.\r\n", Symbols::default()).unwrap();
        assert_eq!(grid.dimensions(), (2, 1));
    }

    #[test]
    fn ignores_lines_after_last_row() {
        let grid = parse_field("1,1\nx\n\nnot part of the grid\n", Symbols::default()).unwrap();
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn rejects_short_row() {
        assert_eq!(
            parse_field("3,2\nx..\nx.\n", Symbols::default()),
            Err(Error::MalformedInput {
                line: 3,
                reason: "row has 2 cells, expected 3".into()
            })
        );
    }

    #[test]
    fn rejects_long_row_missing_row_and_bad_symbol() {
        for content in ["2,1\nx..\n", "2,2\nx.\n", "2,1\nxo\n", "", "2;2\n", "2,2,2\n"] {
            assert!(
                matches!(
                    parse_field(content, Symbols::default()),
                    Err(Error::MalformedInput { .. })
                ),
                "{content:?}"
            );
        }
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            parse_field("0,3\n", Symbols::default()),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(matches!(
            parse_field("4,-1\n", Symbols::default()),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn header_larger_than_memory_is_rejected() {
        assert!(matches!(
            parse_field("4294967296,4294967296\n", Symbols::default()),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            parse_field("9223372036854775807,2\n", Symbols::default()),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn header_without_rows_is_a_missing_row() {
        assert_eq!(
            parse_field("3037000499,3037000499\n", Symbols::default()),
            Err(Error::MalformedInput {
                line: 2,
                reason: "expected 3037000499 rows, got 0".into()
            })
        );
    }

    #[test]
    fn custom_symbols_round_trip() {
        let symbols = Symbols {
            alive: '#',
            dead: ' ',
        };
        let text = "4,2\n#  #\n ## \n";
        let grid = parse_field(text, symbols).unwrap();
        assert_eq!(convert_to_string(&grid, symbols), text);
    }

    #[test]
    fn write_field_emits_header_and_rows() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_alive(1, 0);
        let mut out = Vec::new();
        write_field(&mut out, &grid, Symbols::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2,2\n.x\n..\n");
    }
}
