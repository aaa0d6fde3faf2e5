use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use gridly::prelude::*;
use gridly_grids::VecGrid;
use joinery::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FlashError, MalformedGrid};
use crate::neighbors::{contains, locations};

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// A fixed-size rectangle of energy levels. Every access is bounds
/// checked; the dimensions never change after construction.
#[derive(Clone)]
pub struct EnergyGrid {
    dimensions: Vector,
    cells: VecGrid<u32>,
}

impl EnergyGrid {
    /// Build a grid from rows of energy levels. Every row must be as long
    /// as the first one, and there must be at least one cell.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, FlashError> {
        let num_columns = match rows.first() {
            None => return Err(MalformedGrid::Empty.into()),
            Some(first) if first.is_empty() => return Err(MalformedGrid::Empty.into()),
            Some(first) => first.len(),
        };

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != num_columns)
        {
            return Err(MalformedGrid::RaggedRow {
                line: index + 1,
                expected: num_columns,
                found: row.len(),
            }
            .into());
        }

        let dimensions = Rows(rows.len() as isize) + Columns(num_columns as isize);
        let mut cells = VecGrid::new_fill(dimensions, &0).ok_or(MalformedGrid::Empty)?;

        for (location, level) in locations(dimensions).zip(rows.into_iter().flatten()) {
            *cells
                .get_mut(location)
                .map_err(|_| FlashError::out_of_bounds(location, dimensions))? = level;
        }

        Ok(EnergyGrid { dimensions, cells })
    }

    #[inline]
    pub fn dimensions(&self) -> Vector {
        self.dimensions
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.dimensions.rows.0 * self.dimensions.columns.0) as usize
    }

    fn check(&self, location: Location) -> Result<Location, FlashError> {
        if contains(self.dimensions, location) {
            Ok(location)
        } else {
            Err(FlashError::out_of_bounds(location, self.dimensions))
        }
    }

    fn cell_mut(&mut self, location: Location) -> Result<&mut u32, FlashError> {
        let location = self.check(location)?;
        let dimensions = self.dimensions;

        self.cells
            .get_mut(location)
            .map_err(|_| FlashError::out_of_bounds(location, dimensions))
    }

    pub fn get(&self, location: Location) -> Result<u32, FlashError> {
        let location = self.check(location)?;

        self.cells
            .get(location)
            .map(|&level| level)
            .map_err(|_| FlashError::out_of_bounds(location, self.dimensions))
    }

    /// Overwrite a cell. No upper bound is enforced; mid-tick levels are
    /// allowed to run past the flash threshold.
    pub fn set(&mut self, location: Location, level: u32) -> Result<(), FlashError> {
        *self.cell_mut(location)? = level;
        Ok(())
    }

    /// Add one to a cell, returning its new level.
    pub fn increment(&mut self, location: Location) -> Result<u32, FlashError> {
        let cell = self.cell_mut(location)?;
        *cell += 1;
        Ok(*cell)
    }

    /// Snapshot of every level, one `Vec` per row.
    pub fn levels(&self) -> Vec<Vec<u32>> {
        let num_columns = self.dimensions.columns.0 as usize;
        let flat: Vec<u32> = locations(self.dimensions)
            .filter_map(|location| self.get(location).ok())
            .collect();

        flat.chunks(num_columns).map(<[u32]>::to_vec).collect()
    }
}

impl PartialEq for EnergyGrid {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.levels() == other.levels()
    }
}

impl Eq for EnergyGrid {}

impl Debug for EnergyGrid {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("EnergyGrid")
            .field("dimensions", &self.dimensions)
            .field("levels", &self.levels())
            .finish()
    }
}

impl Display for EnergyGrid {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let lines: Vec<String> = self
            .levels()
            .iter()
            .map(|row| row.iter().map(|level| level.to_string()).collect())
            .collect();

        write!(f, "{}", lines.join_with('\n'))
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<Vec<u32>, MalformedGrid> {
    if let Some(bad) = NON_DIGIT.find(line) {
        return Err(MalformedGrid::InvalidDigit {
            line: line_number,
            column: line[..bad.start()].chars().count() + 1,
            found: bad.as_str().chars().next().unwrap_or_default(),
        });
    }

    Ok(line.bytes().map(|b| u32::from(b - b'0')).collect())
}

impl FromStr for EnergyGrid {
    type Err = FlashError;

    /// Parse one line per row, one decimal digit per cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .trim()
            .lines()
            .map(str::trim)
            .enumerate()
            .map(|(index, line)| parse_line(index + 1, line))
            .collect::<Result<Vec<_>, _>>()?;

        EnergyGrid::from_rows(rows)
    }
}
