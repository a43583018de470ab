//! Single cells of tabular data and their coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selection::reference::to_reference;

/// A zero-based (x, y) position within a table.
///
/// `x` is the column index and `y` the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Create a new coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Spreadsheet-style reference for this coordinate (e.g. "B4").
    pub fn reference(&self) -> String {
        to_reference(self.x, self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x:{}, y:{} ({})", self.x, self.y, self.reference())
    }
}

/// Anything occupying a position in a table.
///
/// The selection algebra compares items by their coordinate only, so it is
/// written against this trait rather than against [`Cell`] directly.
pub trait Located {
    fn coord(&self) -> Coord;
}

impl Located for Coord {
    fn coord(&self) -> Coord {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coord(&self) -> Coord {
        (**self).coord()
    }
}

/// A single cell of data.
///
/// Coordinates are fixed at creation. Several cells may share a coordinate
/// within one grid when they represent distinct readings of the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    x: usize,
    y: usize,
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sheet: Option<String>,
}

impl Cell {
    /// Create a cell holding a value.
    pub fn new(x: usize, y: usize, value: impl Into<String>) -> Self {
        Self {
            x,
            y,
            value: Some(value.into()),
            sheet: None,
        }
    }

    /// Create a cell with no value.
    pub fn blank(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            value: None,
            sheet: None,
        }
    }

    /// Create a cell from an optional value.
    pub fn with_value(x: usize, y: usize, value: Option<String>) -> Self {
        Self {
            x,
            y,
            value,
            sheet: None,
        }
    }

    /// Tag the cell with the sheet it was read from.
    pub fn in_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// The cell value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The sheet this cell was read from, if known.
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    /// Spreadsheet-style reference for this cell (e.g. "A1").
    pub fn reference(&self) -> String {
        to_reference(self.x, self.y)
    }

    /// Whether the cell holds no value or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.as_deref().is_none_or(|v| v.trim().is_empty())
    }
}

impl Located for Cell {
    fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:{}, y:{}, value = {}",
            self.x,
            self.y,
            self.value.as_deref().unwrap_or("")
        )
    }
}
