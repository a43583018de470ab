//! Pure set operations over ordered cell sequences.
//!
//! Every function here compares items by coordinate only; values are never
//! consulted. Membership tests go through hashed coordinate sets, so each
//! operation is linear in the size of its inputs.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::error::{DataChefError, Result};
use crate::model::{Coord, Located};

use super::reference::CellRange;

/// Axis along which an offset is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Columns.
    X,
    /// Rows.
    Y,
}

/// Which end of an axis to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Min,
    Max,
}

fn coordinates<T: Located>(cells: &[T]) -> HashSet<Coord> {
    cells.iter().map(Located::coord).collect()
}

/// Whether any item of `set` shares `cell`'s coordinate.
pub fn contains<C: Located, T: Located>(cell: &C, set: &[T]) -> bool {
    let target = cell.coord();
    set.iter().any(|c| c.coord() == target)
}

/// Items of `a` whose coordinate does not appear in `b`.
///
/// Keeps the relative order of `a` and drops repeated coordinates, keeping
/// the first occurrence.
pub fn not_in<T: Located + Clone, U: Located>(a: &[T], b: &[U]) -> Vec<T> {
    let excluded = coordinates(b);
    let mut seen = HashSet::with_capacity(a.len());
    a.iter()
        .filter(|cell| {
            let coord = cell.coord();
            !excluded.contains(&coord) && seen.insert(coord)
        })
        .cloned()
        .collect()
}

/// Items of `a` whose coordinate appears in `b`, in `a`'s order.
pub fn matching<T: Located + Clone, U: Located>(a: &[T], b: &[U]) -> Vec<T> {
    let wanted = coordinates(b);
    a.iter()
        .filter(|cell| wanted.contains(&cell.coord()))
        .cloned()
        .collect()
}

/// Minimum or maximum coordinate along an axis.
pub fn extreme_offset<T: Located>(cells: &[T], axis: Axis, extreme: Extreme) -> Result<usize> {
    let values = cells.iter().map(|c| {
        let coord = c.coord();
        match axis {
            Axis::X => coord.x,
            Axis::Y => coord.y,
        }
    });
    let found = match extreme {
        Extreme::Min => values.min(),
        Extreme::Max => values.max(),
    };
    found.ok_or_else(|| {
        DataChefError::EmptySelection(format!(
            "cannot take the {:?} {:?} offset of zero cells",
            extreme, axis
        ))
    })
}

/// Items on column `x`.
pub fn cells_on_x<T: Located + Clone>(cells: &[T], x: usize) -> Vec<T> {
    cells.iter().filter(|c| c.coord().x == x).cloned().collect()
}

/// Items on row `y`.
pub fn cells_on_y<T: Located + Clone>(cells: &[T], y: usize) -> Vec<T> {
    cells.iter().filter(|c| c.coord().y == y).cloned().collect()
}

/// First item at exactly `coord`.
pub fn cell_at<T: Located>(cells: &[T], coord: Coord) -> Option<&T> {
    cells.iter().find(|c| c.coord() == coord)
}

/// Whether `cell` lies inside `range`.
pub fn is_within<C: Located>(cell: &C, range: &CellRange) -> bool {
    range.contains(cell.coord())
}

/// Sort into reading order: top to bottom, then left to right.
pub fn human_read_order<T: Located + Clone>(cells: &[T]) -> Vec<T> {
    let mut ordered = cells.to_vec();
    ordered.sort_by_key(|c| {
        let coord = c.coord();
        (coord.y, coord.x)
    });
    ordered
}

/// Items lying outside the interquartile fence on either axis.
///
/// Each axis is judged independently: a cell is flagged when its x falls
/// outside `[q1 - k*iqr, q3 + k*iqr]` of all x values, or its y does the same
/// for y values. The result is advisory and never blocks a selection.
pub fn outliers<T: Located + Clone>(cells: &[T], multiplier: f64) -> Vec<T> {
    if cells.len() < 4 {
        return Vec::new();
    }

    let xs: Vec<usize> = cells.iter().map(|c| c.coord().x).collect();
    let ys: Vec<usize> = cells.iter().map(|c| c.coord().y).collect();
    let x_fence = Fence::from_values(&xs, multiplier);
    let y_fence = Fence::from_values(&ys, multiplier);

    cells
        .iter()
        .filter(|c| {
            let coord = c.coord();
            x_fence.excludes(coord.x) || y_fence.excludes(coord.y)
        })
        .cloned()
        .collect()
}

/// Interquartile bounds of a distribution.
#[derive(Debug, Clone, Copy)]
struct Fence {
    lower: f64,
    upper: f64,
}

impl Fence {
    fn from_values(values: &[usize], multiplier: f64) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();

        let q1 = percentile(&sorted, 25.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        Self {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    fn excludes(&self, value: usize) -> bool {
        let v = value as f64;
        v < self.lower || v > self.upper
    }
}

/// Nearest-rank percentile of already sorted values.
fn percentile(sorted: &[usize], p: f64) -> f64 {
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)] as f64
}

/// Check that the cells form a solid rectangle.
pub fn assert_rectangular<T: Located>(cells: &[T]) -> Result<()> {
    let range = CellRange::bounding(cells)?;
    let distinct = coordinates(cells).len();
    let expected = range.area().unwrap_or(u128::MAX);
    if distinct as u128 != expected {
        return Err(DataChefError::NonRectangular {
            cells: distinct,
            expected,
        });
    }
    Ok(())
}

/// Distinct coordinates in first-seen order.
pub fn ordered_coordinates<T: Located>(cells: &[T]) -> IndexSet<Coord> {
    cells.iter().map(Located::coord).collect()
}
