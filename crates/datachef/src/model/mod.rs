//! Cells and grids.

mod cell;
mod grid;

pub use cell::{Cell, Coord, Located};
pub use grid::{Grid, Signature};
