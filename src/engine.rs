//! The flash simulation. Each tick charges every cell by one, then lets
//! any cell above [`FLASH_THRESHOLD`] flash: it resets to zero and pushes
//! one unit of energy into each of its neighbors, which may in turn flash.
//! A cell flashes at most once per tick, and once it has flashed it
//! absorbs no more energy until the next tick.

use std::collections::HashSet;

use gridly::prelude::*;
use tracing::{debug, trace};

use crate::error::FlashError;
use crate::grid::EnergyGrid;
use crate::neighbors::{locations, touching};

/// A cell flashes once its level is strictly greater than this.
pub const FLASH_THRESHOLD: u32 = 9;

/// The outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub flashes: usize,

    /// Every cell in the grid flashed during this tick.
    pub synchronized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashEngine {
    grid: EnergyGrid,
}

impl FlashEngine {
    pub fn new(grid: EnergyGrid) -> Self {
        FlashEngine { grid }
    }

    #[inline]
    pub fn grid(&self) -> &EnergyGrid {
        &self.grid
    }

    pub fn into_grid(self) -> EnergyGrid {
        self.grid
    }

    /// Upper bound on the number of cascade passes a tick can need. Every
    /// pass but the last flashes at least one new cell, and no cell
    /// flashes twice, so the cascade settles within `cell_count + 1`
    /// passes.
    #[inline]
    pub fn pass_limit(&self) -> usize {
        self.grid.cell_count() + 1
    }

    /// Run one tick and return how many cells flashed.
    pub fn advance(&mut self) -> Result<usize, FlashError> {
        self.tick().map(|tick| tick.flashes)
    }

    pub fn tick(&mut self) -> Result<Tick, FlashError> {
        let limit = self.pass_limit();
        self.tick_with_pass_limit(limit)
    }

    /// Same as [`advance`][FlashEngine::advance], but with an explicit cap
    /// on cascade passes. Any cap at or above [`pass_limit`][Self::pass_limit]
    /// gives identical results.
    pub fn advance_with_pass_limit(&mut self, limit: usize) -> Result<usize, FlashError> {
        self.tick_with_pass_limit(limit).map(|tick| tick.flashes)
    }

    fn tick_with_pass_limit(&mut self, limit: usize) -> Result<Tick, FlashError> {
        self.charge()?;

        let mut flashed = HashSet::with_capacity(self.grid.cell_count());
        self.cascade(&mut flashed, limit)?;

        let flashes = flashed.len();
        let synchronized = flashes == self.grid.cell_count();

        if synchronized {
            debug!(flashes, "every cell flashed this tick");
        }

        Ok(Tick {
            flashes,
            synchronized,
        })
    }

    fn charge(&mut self) -> Result<(), FlashError> {
        for location in locations(self.grid.dimensions()) {
            self.grid.increment(location)?;
        }

        Ok(())
    }

    fn cascade(&mut self, flashed: &mut HashSet<Location>, limit: usize) -> Result<(), FlashError> {
        let dimensions = self.grid.dimensions();

        for pass in 0..limit {
            let before = flashed.len();

            for location in locations(dimensions) {
                if flashed.contains(&location) || self.grid.get(location)? <= FLASH_THRESHOLD {
                    continue;
                }

                flashed.insert(location);
                self.grid.set(location, 0)?;

                for neighbor in touching(location, dimensions) {
                    if !flashed.contains(&neighbor) {
                        self.grid.increment(neighbor)?;
                    }
                }
            }

            if flashed.len() == before {
                trace!(passes = pass + 1, flashes = before, "cascade settled");
                return Ok(());
            }
        }

        trace!(limit, flashes = flashed.len(), "cascade hit the pass limit");
        Ok(())
    }

    /// Run `ticks` ticks and return the total number of flashes.
    pub fn total_flashes(&mut self, ticks: usize) -> Result<usize, FlashError> {
        (0..ticks).try_fold(0, |total, _| Ok(total + self.advance()?))
    }

    /// Run ticks until every cell flashes in the same tick, and return that
    /// tick's 1-based index. Gives up with [`FlashError::NoSynchrony`]
    /// after `max_ticks` ticks.
    pub fn first_synchrony(&mut self, max_ticks: usize) -> Result<usize, FlashError> {
        for index in 1..=max_ticks {
            if self.tick()?.synchronized {
                debug!(tick = index, "grid synchronized");
                return Ok(index);
            }
        }

        Err(FlashError::NoSynchrony { ticks: max_ticks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rows: Vec<Vec<u32>>) -> FlashEngine {
        FlashEngine::new(EnergyGrid::from_rows(rows).unwrap())
    }

    fn levels(engine: &FlashEngine) -> Vec<Vec<u32>> {
        engine.grid().levels()
    }

    #[test]
    fn quiet_grid_only_charges() {
        let mut sim = engine(vec![vec![0, 3, 8], vec![8, 8, 1]]);

        assert_eq!(sim.advance(), Ok(0));
        assert_eq!(levels(&sim), vec![vec![1, 4, 9], vec![9, 9, 2]]);
    }

    #[test]
    fn full_square_flashes_together() {
        let mut sim = engine(vec![vec![9, 9], vec![9, 9]]);

        assert_eq!(
            sim.tick(),
            Ok(Tick {
                flashes: 4,
                synchronized: true
            })
        );
        assert_eq!(levels(&sim), vec![vec![0, 0], vec![0, 0]]);
    }

    #[test]
    fn single_flash_feeds_neighbors() {
        let mut sim = engine(vec![vec![1, 1, 1], vec![1, 9, 1], vec![1, 1, 1]]);

        assert_eq!(sim.advance(), Ok(1));
        assert_eq!(
            levels(&sim),
            vec![vec![3, 3, 3], vec![3, 0, 3], vec![3, 3, 3]]
        );
    }

    #[test]
    fn chain_reaction_reaches_back_up_the_grid() {
        // The last cell in row-major order sets off a chain that runs back
        // to the first, one link per pass.
        let mut sim = engine(vec![vec![8, 0, 0], vec![8, 0, 0], vec![0, 8, 9]]);

        assert_eq!(sim.advance(), Ok(4));
        assert_eq!(
            levels(&sim),
            vec![vec![0, 3, 1], vec![0, 5, 3], vec![3, 0, 0]]
        );
    }

    #[test]
    fn flashed_cells_absorb_nothing() {
        // Both cells flash; whichever goes first must not receive energy
        // from the second.
        let mut sim = engine(vec![vec![9, 9, 0]]);

        assert_eq!(sim.advance(), Ok(2));
        assert_eq!(levels(&sim), vec![vec![0, 0, 2]]);
    }

    #[test]
    fn lone_cell() {
        let mut sim = engine(vec![vec![8]]);

        assert_eq!(sim.advance(), Ok(0));
        assert_eq!(
            sim.tick(),
            Ok(Tick {
                flashes: 1,
                synchronized: true
            })
        );
        assert_eq!(levels(&sim), vec![vec![0]]);
    }

    #[test]
    fn small_example_two_ticks() {
        let mut sim = engine(vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 9, 9, 9, 1],
            vec![1, 9, 1, 9, 1],
            vec![1, 9, 9, 9, 1],
            vec![1, 1, 1, 1, 1],
        ]);

        assert_eq!(sim.advance(), Ok(9));
        assert_eq!(sim.grid().to_string(), "34543\n40004\n50005\n40004\n34543");

        assert_eq!(sim.advance(), Ok(0));
        assert_eq!(sim.grid().to_string(), "45654\n51115\n61116\n51115\n45654");
    }

    #[test]
    fn total_flashes_sums_ticks() {
        let mut sim = engine(vec![vec![9, 9], vec![9, 9]]);

        // Everything flashes on tick 1, then recharges for ten ticks and
        // flashes again on tick 11.
        assert_eq!(sim.total_flashes(10), Ok(4));
        assert_eq!(sim.total_flashes(1), Ok(4));
        assert_eq!(sim.total_flashes(0), Ok(0));
    }

    #[test]
    fn first_synchrony_counts_from_one() {
        assert_eq!(engine(vec![vec![9, 9], vec![9, 9]]).first_synchrony(5), Ok(1));
        assert_eq!(engine(vec![vec![0, 0], vec![0, 0]]).first_synchrony(20), Ok(10));
    }

    #[test]
    fn first_synchrony_gives_up() {
        assert_eq!(
            engine(vec![vec![0, 0], vec![0, 0]]).first_synchrony(9),
            Err(FlashError::NoSynchrony { ticks: 9 })
        );

        // These two cells trade flashes forever and never line up.
        assert_eq!(
            engine(vec![vec![1, 9]]).first_synchrony(500),
            Err(FlashError::NoSynchrony { ticks: 500 })
        );
    }

    #[test]
    fn synchronized_tick_leaves_all_zero() {
        let mut sim = engine(vec![vec![8, 9], vec![9, 9]]);

        assert_eq!(sim.first_synchrony(1), Ok(1));
        assert!(levels(&sim).iter().flatten().all(|&level| level == 0));
    }
}
