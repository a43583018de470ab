//! A full table of cells as acquired from a source.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cell::Cell;

/// Opaque identifier of one acquisition of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Signature(Uuid);

impl Signature {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered collection of cells representing one table.
///
/// The signature is generated once at construction. Clones keep it, so a
/// copy-derived grid is recognised as the same table; two grids built
/// independently from the same data are not. A deserialized grid is a new
/// acquisition and always gets a fresh signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
    #[serde(skip_deserializing, default = "Signature::generate")]
    signature: Signature,
}

impl Grid {
    /// Create a grid with a fresh signature.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            signature: Signature::generate(),
        }
    }

    /// Create a grid from row-major values, one cell per entry.
    pub fn from_rows<R, V>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<Option<String>>,
    {
        let mut cells = Vec::new();
        for (y, row) in rows.into_iter().enumerate() {
            for (x, value) in row.into_iter().enumerate() {
                cells.push(Cell::with_value(x, y, value.into()));
            }
        }
        Self::new(cells)
    }

    /// A grid of other cells recognised as the same table as `self`.
    pub fn derived(&self, cells: Vec<Cell>) -> Self {
        Self {
            cells,
            signature: self.signature,
        }
    }

    /// Cells in acquisition order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the grid, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
