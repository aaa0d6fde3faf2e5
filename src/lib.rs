//! A grid of energy levels that charge every tick and flash in chain
//! reactions once they pass a threshold.
//!
//! ```
//! use flashgrid::{EnergyGrid, FlashEngine};
//!
//! let grid: EnergyGrid = "99\n99".parse().unwrap();
//! let mut engine = FlashEngine::new(grid);
//!
//! assert_eq!(engine.advance().unwrap(), 4);
//! assert_eq!(engine.grid().to_string(), "00\n00");
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod neighbors;

pub use engine::{FlashEngine, Tick, FLASH_THRESHOLD};
pub use error::{FlashError, MalformedGrid};
pub use grid::EnergyGrid;
