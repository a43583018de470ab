//! Conversion between (x, y) coordinates and spreadsheet-style references.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DEFAULT_BAD_CELLS_TO_DISPLAY;
use crate::error::{DataChefError, Result};
use crate::model::{Coord, Located};

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+)([0-9]+)$").expect("hardcoded reference pattern"));

/// Render a zero-based coordinate as a reference, e.g. `(27, 9)` -> `"AB10"`.
///
/// Defined for every `usize` coordinate; row numbers are widened so
/// `y == usize::MAX` still renders.
pub fn to_reference(x: usize, y: usize) -> String {
    format!("{}{}", column_letters(x), y as u128 + 1)
}

/// Parse a single reference such as `"AB10"` into a zero-based coordinate.
pub fn from_reference(reference: &str) -> Result<Coord> {
    let malformed = || DataChefError::MalformedReference(reference.to_string());
    let captures = REFERENCE_PATTERN.captures(reference).ok_or_else(malformed)?;

    let x = column_index(&captures[1]).ok_or_else(malformed)?;
    let row: u128 = captures[2].parse().map_err(|_| malformed())?;
    let y = row
        .checked_sub(1)
        .and_then(|y| usize::try_from(y).ok())
        .ok_or_else(malformed)?;
    Ok(Coord::new(x, y))
}

/// Column letters for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA.
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn column_index(letters: &str) -> Option<usize> {
    let mut col: u128 = 0;
    for ch in letters.bytes() {
        col = col.checked_mul(26)?;
        col = col.checked_add(u128::from(ch - b'A' + 1))?;
    }
    usize::try_from(col.checked_sub(1)?).ok()
}

/// An inclusive, normalised rectangular range of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: Coord,
    end: Coord,
}

impl CellRange {
    /// Create a range from any two corners.
    pub fn new(a: Coord, b: Coord) -> Self {
        Self {
            start: Coord::new(a.x.min(b.x), a.y.min(b.y)),
            end: Coord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Parse `"B2"` or `"B2:D9"`. Reversed corners are normalised.
    pub fn parse(reference: &str) -> Result<Self> {
        match reference.split_once(':') {
            Some((left, right)) => Ok(Self::new(from_reference(left)?, from_reference(right)?)),
            None => {
                let coord = from_reference(reference)?;
                Ok(Self::new(coord, coord))
            }
        }
    }

    /// Minimal bounding box of a set of cells.
    pub fn bounding<T: Located>(cells: &[T]) -> Result<Self> {
        let mut coords = cells.iter().map(Located::coord);
        let first = coords
            .next()
            .ok_or_else(|| DataChefError::EmptySelection("cannot bound zero cells".to_string()))?;

        let (mut min, mut max) = (first, first);
        for c in coords {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Ok(Self::new(min, max))
    }

    /// Top-left corner.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Bottom-right corner.
    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn width(&self) -> u128 {
        (self.end.x - self.start.x) as u128 + 1
    }

    pub fn height(&self) -> u128 {
        (self.end.y - self.start.y) as u128 + 1
    }

    /// Number of coordinates in the range. `None` only when the range spans
    /// every coordinate on both axes.
    pub fn area(&self) -> Option<u128> {
        self.width().checked_mul(self.height())
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.start.x..=self.end.x).contains(&coord.x)
            && (self.start.y..=self.end.y).contains(&coord.y)
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange::new(
            Coord::new(self.start.x.min(other.start.x), self.start.y.min(other.start.y)),
            Coord::new(self.end.x.max(other.end.x), self.end.y.max(other.end.y)),
        )
    }

    /// Every coordinate in the range, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.start.y..=self.end.y)
            .flat_map(move |y| (self.start.x..=self.end.x).map(move |x| Coord::new(x, y)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start.reference())
        } else {
            write!(f, "{}:{}", self.start.reference(), self.end.reference())
        }
    }
}

/// Bounding box of `cells` rendered as `"A1:C3"`, or `"B2"` when 1x1.
///
/// This is a summary only: cells inside the box may be absent from the set.
pub fn range_to_reference<T: Located>(cells: &[T]) -> Result<String> {
    Ok(CellRange::bounding(cells)?.to_string())
}

/// Source cells covered by `reference`, in source order.
///
/// Fails with [`DataChefError::OutOfBounds`] when a requested coordinate has
/// no cell in `source`, listing the first few of them.
pub fn reference_to_cells<T: Located + Clone>(reference: &str, source: &[T]) -> Result<Vec<T>> {
    reference_to_cells_with_limit(reference, source, DEFAULT_BAD_CELLS_TO_DISPLAY)
}

/// [`reference_to_cells`], listing at most `display_limit` missing
/// coordinates in the error.
pub fn reference_to_cells_with_limit<T: Located + Clone>(
    reference: &str,
    source: &[T],
    display_limit: usize,
) -> Result<Vec<T>> {
    let range = CellRange::parse(reference)?;
    assert_range_within(&range, source, display_limit)?;

    Ok(source
        .iter()
        .filter(|cell| range.contains(cell.coord()))
        .cloned()
        .collect())
}

/// Check that every coordinate named by `reference` exists in `cells`.
pub fn assert_reference_within<T: Located>(reference: &str, cells: &[T]) -> Result<()> {
    let range = CellRange::parse(reference)?;
    assert_range_within(&range, cells, DEFAULT_BAD_CELLS_TO_DISPLAY)
}

fn assert_range_within<T: Located>(
    range: &CellRange,
    cells: &[T],
    display_limit: usize,
) -> Result<()> {
    let present: HashSet<Coord> = cells
        .iter()
        .map(Located::coord)
        .filter(|c| range.contains(*c))
        .collect();

    // A full-span range saturates; it can never be covered anyway.
    let area = range.area().unwrap_or(u128::MAX);
    let total = area - present.len() as u128;
    if total == 0 {
        return Ok(());
    }

    // Present cells are skipped lazily, so this visits at most
    // present.len() + display_limit coordinates.
    let shown: Vec<Coord> = range
        .coords()
        .filter(|c| !present.contains(c))
        .take(display_limit)
        .collect();
    Err(DataChefError::OutOfBounds {
        shown,
        total,
        display_limit,
    })
}
