//! Resolving observations to the labels that describe them.

mod direct;

use crate::error::Result;
use crate::model::Cell;

pub use direct::{DirectLookup, Direction};

/// Finds the label that applies to a cell.
pub trait LookupEngine {
    /// The value of the label cell related to `cell`.
    fn resolve(&self, cell: &Cell) -> Result<String>;
}
