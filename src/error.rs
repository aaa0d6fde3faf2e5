use gridly::prelude::*;

/// Ways a block of text can fail to describe a rectangular digit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGrid {
    #[error("the grid has no cells")]
    Empty,

    #[error("line {line} has {found} cells, but the first line has {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: {found:?} is not a digit")]
    InvalidDigit {
        line: usize,
        column: usize,
        found: char,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlashError {
    /// A coordinate outside the grid was addressed. This is always a bug
    /// in the caller.
    #[error("location ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: isize,
        column: isize,
        rows: isize,
        columns: isize,
    },

    #[error("malformed grid: {0}")]
    MalformedGrid(#[from] MalformedGrid),

    /// The grid never flashed all at once within the search bound.
    #[error("no synchronized flash within {ticks} ticks")]
    NoSynchrony { ticks: usize },
}

impl FlashError {
    pub(crate) fn out_of_bounds(location: Location, dimensions: Vector) -> Self {
        FlashError::OutOfBounds {
            row: location.row.0,
            column: location.column.0,
            rows: dimensions.rows.0,
            columns: dimensions.columns.0,
        }
    }
}
