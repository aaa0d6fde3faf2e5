//! Coordinate arithmetic over a grid's bounds: validity checks, row-major
//! sweeps, and the 8-connected neighborhood of a cell.

use gridly::prelude::*;

/// True if `location` lies within a grid of the given dimensions.
#[inline]
pub fn contains(dimensions: Vector, location: Location) -> bool {
    (0..dimensions.rows.0).contains(&location.row.0)
        && (0..dimensions.columns.0).contains(&location.column.0)
}

/// Every location in a grid of the given dimensions, in row-major order.
/// The iterator owns its bounds, so the grid can be mutated while it's
/// being walked.
pub fn locations(dimensions: Vector) -> impl Iterator<Item = Location> + Clone {
    let num_columns = dimensions.columns.0;

    (0..dimensions.rows.0).flat_map(move |row| {
        (0..num_columns).map(move |column| Row(row) + Column(column))
    })
}

/// The in-bounds cells horizontally, vertically, or diagonally adjacent to
/// `location`. The order of the yielded locations is unspecified.
pub fn touching(location: Location, dimensions: Vector) -> impl Iterator<Item = Location> {
    TOUCHING_ADJACENCIES
        .iter()
        .map(move |&offset| location + offset)
        .filter(move |&neighbor| contains(dimensions, neighbor))
}
