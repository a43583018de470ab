//! Live tables: a pristine grid paired with the currently selected cells.

use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, Sub};
use std::sync::Arc;

use tracing::debug;

use crate::config::DEFAULT_BAD_CELLS_TO_DISPLAY;
use crate::error::{DataChefError, Result};
use crate::model::{Cell, Coord, Grid, Located, Signature};

use super::algebra;
use super::reference;

/// A pristine cell together with its position in the pristine grid.
#[derive(Debug, Clone, Copy)]
struct Indexed<'a> {
    index: usize,
    cell: &'a Cell,
}

impl Located for Indexed<'_> {
    fn coord(&self) -> Coord {
        self.cell.coord()
    }
}

/// A "live" table represents two things:
///
/// 1. **pristine**: the table as acquired from the source.
/// 2. **filtered**: the current subset of cells (up to all) selected from it.
///
/// Keeping the pristine table around lets a selection be widened again as well
/// as narrowed: references are always resolved against the pristine cells.
///
/// The pristine grid is shared between every selection derived from it, and
/// the filtered side is a list of positions into that grid. Operators never
/// mutate their operands; each returns a new `LiveTable`.
#[derive(Debug, Clone)]
pub struct LiveTable {
    pristine: Arc<Grid>,
    filtered: Vec<usize>,
    name: Option<String>,
    source: Option<String>,
    label: Option<String>,
    display_limit: usize,
}

impl LiveTable {
    /// Wrap a freshly acquired grid. Every cell starts out selected.
    pub fn from_grid(grid: Grid) -> Self {
        let filtered = (0..grid.len()).collect();
        Self {
            pristine: Arc::new(grid),
            filtered,
            name: None,
            source: None,
            label: None,
            display_limit: DEFAULT_BAD_CELLS_TO_DISPLAY,
        }
    }

    /// Build a live table from separately held pristine and filtered grids.
    ///
    /// Both grids must share a signature, and every filtered cell must exist
    /// in the pristine grid.
    pub fn from_parts(pristine: Grid, filtered: Grid) -> Result<Self> {
        if pristine.signature() != filtered.signature() {
            return Err(DataChefError::InvalidTableSignatures);
        }
        LiveTable::from_grid(pristine).with_filtered(filtered)
    }

    /// Replace the selected cells with those of an externally supplied grid.
    ///
    /// Cells are matched against the pristine grid by coordinate, preferring a
    /// reading with the same value when a coordinate holds several.
    pub fn with_filtered(&self, grid: Grid) -> Result<Self> {
        if grid.signature() != self.signature() {
            return Err(DataChefError::InvalidTableSignatures);
        }

        let mut by_coord: HashMap<Coord, Vec<usize>> = HashMap::new();
        for (index, cell) in self.pristine.cells().iter().enumerate() {
            by_coord.entry(cell.coord()).or_default().push(index);
        }

        let mut indices = Vec::with_capacity(grid.len());
        let mut missing = Vec::new();
        for cell in grid.cells() {
            let Some(candidates) = by_coord.get(&cell.coord()) else {
                missing.push(cell.coord());
                continue;
            };
            let exact = candidates
                .iter()
                .copied()
                .find(|&i| &self.pristine.cells()[i] == cell);
            indices.push(exact.unwrap_or(candidates[0]));
        }

        if !missing.is_empty() {
            return Err(DataChefError::out_of_bounds(missing, self.display_limit));
        }
        Ok(self.narrowed(indices))
    }

    /// Set the table name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set where the table was acquired from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set how many missing cells an out-of-bounds error lists. At least one.
    ///
    /// Carried over to every selection derived from this one.
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit.max(1);
        self
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Attach a display label used by previews.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The table name. Fails if no name was ever assigned.
    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or(DataChefError::UnnamedTable)
    }

    /// Alternate accessor for [`LiveTable::name`].
    pub fn title(&self) -> Result<&str> {
        self.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Identifies the acquisition this selection was taken from.
    pub fn signature(&self) -> Signature {
        self.pristine.signature()
    }

    /// Currently selected cells, in selection order.
    pub fn cells(&self) -> Vec<&Cell> {
        self.iter().collect()
    }

    /// Every cell of the table as acquired.
    pub fn pristine_cells(&self) -> &[Cell] {
        self.pristine.cells()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cells: self.pristine.cells(),
            indices: self.filtered.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Whether the selection differs in size from the pristine table.
    pub fn selections_made(&self) -> bool {
        self.filtered.len() != self.pristine.len()
    }

    /// Select the cells named by a reference such as `"A1:C5"`.
    ///
    /// Resolved against the pristine table, so this can widen a previously
    /// narrowed selection back out, but never beyond the original table.
    pub fn excel_ref(&self, reference: &str) -> Result<Self> {
        let pristine = self.indexed_pristine();
        let selected =
            reference::reference_to_cells_with_limit(reference, &pristine, self.display_limit)?;
        debug!(reference, cells = selected.len(), "excel_ref");
        Ok(self.narrowed(selected.iter().map(|c| c.index).collect()))
    }

    /// Cells of `self` whose coordinate is not selected in `other`.
    pub fn subtract(&self, other: &LiveTable) -> Result<Self> {
        self.check_aligned(other)?;
        let kept = algebra::not_in(&self.indexed_filtered(), &other.indexed_filtered());
        debug!(before = self.len(), after = kept.len(), "subtract");
        Ok(self.narrowed(kept.iter().map(|c| c.index).collect()))
    }

    /// Cells of `self` followed by those of `other` at coordinates not yet selected.
    pub fn union(&self, other: &LiveTable) -> Result<Self> {
        self.check_aligned(other)?;
        let added = algebra::not_in(&other.indexed_filtered(), &self.indexed_filtered());
        let mut indices = self.filtered.clone();
        indices.extend(added.iter().map(|c| c.index));
        debug!(before = self.len(), after = indices.len(), "union");
        Ok(self.narrowed(indices))
    }

    /// Cells of `self` whose coordinate is also selected in `other`.
    pub fn intersection(&self, other: &LiveTable) -> Result<Self> {
        self.check_aligned(other)?;
        let kept = algebra::matching(&self.indexed_filtered(), &other.indexed_filtered());
        debug!(before = self.len(), after = kept.len(), "intersection");
        Ok(self.narrowed(kept.iter().map(|c| c.index).collect()))
    }

    /// The whole pristine table selected again.
    pub fn reset(&self) -> Self {
        self.narrowed((0..self.pristine.len()).collect())
    }

    /// Bounding reference of the current selection, e.g. `"A1:Z2"`.
    pub fn excel_reference(&self) -> Result<String> {
        reference::range_to_reference(&self.cells())
    }

    /// The value of the only selected cell.
    pub fn lone_value(&self) -> Result<Option<&str>> {
        let mut cells = self.iter();
        match (cells.next(), cells.next()) {
            (Some(cell), None) => Ok(cell.value()),
            _ => Err(DataChefError::LoneValueOnMultipleCells(self.len())),
        }
    }

    /// Check that the selection forms a solid rectangle.
    pub fn assert_rectangular(&self) -> Result<()> {
        algebra::assert_rectangular(&self.cells())
    }

    /// Selected cells lying well outside the bulk of the selection.
    pub fn outliers(&self, multiplier: f64) -> Vec<&Cell> {
        algebra::outliers(&self.cells(), multiplier)
    }

    /// One `x:<x>, y:<y>, value = <value>` line per selected cell.
    pub fn to_xy_string(&self) -> String {
        self.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn check_aligned(&self, other: &LiveTable) -> Result<()> {
        if self.signature() != other.signature() {
            return Err(DataChefError::UnalignedTableOperation);
        }
        Ok(())
    }

    fn indexed_pristine(&self) -> Vec<Indexed<'_>> {
        self.pristine
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| Indexed { index, cell })
            .collect()
    }

    fn indexed_filtered(&self) -> Vec<Indexed<'_>> {
        let cells = self.pristine.cells();
        self.filtered
            .iter()
            .map(|&index| Indexed {
                index,
                cell: &cells[index],
            })
            .collect()
    }

    fn narrowed(&self, filtered: Vec<usize>) -> Self {
        Self {
            pristine: Arc::clone(&self.pristine),
            filtered,
            name: self.name.clone(),
            source: self.source.clone(),
            label: self.label.clone(),
            display_limit: self.display_limit,
        }
    }
}

impl fmt::Display for LiveTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("unnamed table");
        match self.excel_reference() {
            Ok(reference) => write!(f, "{} [{}] ({} cells)", name, reference, self.len()),
            Err(_) => write!(f, "{} (no cells selected)", name),
        }
    }
}

/// Iterator over the selected cells of a [`LiveTable`].
pub struct Iter<'a> {
    cells: &'a [Cell],
    indices: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|&i| &self.cells[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a LiveTable {
    type Item = &'a Cell;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Sub for &LiveTable {
    type Output = Result<LiveTable>;

    fn sub(self, other: Self) -> Self::Output {
        self.subtract(other)
    }
}

impl BitOr for &LiveTable {
    type Output = Result<LiveTable>;

    fn bitor(self, other: Self) -> Self::Output {
        self.union(other)
    }
}

impl BitAnd for &LiveTable {
    type Output = Result<LiveTable>;

    fn bitand(self, other: Self) -> Self::Output {
        self.intersection(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cell_table() -> LiveTable {
        LiveTable::from_grid(Grid::new(vec![
            Cell::new(0, 0, "foo"),
            Cell::new(0, 0, "bar"),
        ]))
    }

    fn block(width: usize, height: usize) -> LiveTable {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y, format!("{x},{y}"))))
            .collect();
        LiveTable::from_grid(Grid::new(cells))
    }

    #[test]
    fn test_simple_xy_str() {
        let table = two_cell_table();
        let lines: Vec<String> = table.to_xy_string().lines().map(String::from).collect();
        assert_eq!(lines, vec!["x:0, y:0, value = foo", "x:0, y:0, value = bar"]);
    }

    #[test]
    fn test_name_setter_and_getter() {
        let mut table = two_cell_table();
        table.set_name("foo");
        assert_eq!(table.name().unwrap(), "foo");
        assert_eq!(table.title().unwrap(), "foo");
    }

    #[test]
    fn test_unnamed_table_err() {
        let table = two_cell_table();
        assert!(matches!(table.name(), Err(DataChefError::UnnamedTable)));
        assert!(matches!(table.title(), Err(DataChefError::UnnamedTable)));
    }

    #[test]
    fn test_selection_iteration() {
        let table = block(3, 2);
        let mut count = 0;
        for cell in &table {
            assert!(cell.value().is_some());
            count += 1;
        }
        assert_eq!(count, 6);
        assert_eq!(table.iter().len(), 6);
    }

    #[test]
    fn test_selections_made() {
        let table = block(4, 4);
        assert!(!table.selections_made());
        let narrowed = table.excel_ref("A1:B2").unwrap();
        assert!(narrowed.selections_made());
        assert!(!narrowed.reset().selections_made());
    }

    #[test]
    fn test_excel_ref_widens_back_towards_pristine() {
        let table = block(5, 5);
        let small = table.excel_ref("B2").unwrap();
        let wide = small.excel_ref("A1:E5").unwrap();
        assert_eq!(wide.len(), 25);
        assert_eq!(wide.signature(), table.signature());
    }

    #[test]
    fn test_operators_do_not_mutate_operands() {
        let table = block(3, 3);
        let top = table.excel_ref("A1:C1").unwrap();
        let diff = (&table - &top).unwrap();
        assert_eq!(diff.len(), 6);
        assert_eq!(table.len(), 9);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_intersection() {
        let table = block(3, 3);
        let left = table.excel_ref("A1:B3").unwrap();
        let bottom = table.excel_ref("A3:C3").unwrap();
        let both = (&left & &bottom).unwrap();
        assert_eq!(both.excel_reference().unwrap(), "A3:B3");
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_lone_value() {
        let table = block(3, 3);
        assert_eq!(table.excel_ref("B2").unwrap().lone_value().unwrap(), Some("1,1"));
        assert!(matches!(
            table.lone_value(),
            Err(DataChefError::LoneValueOnMultipleCells(9))
        ));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_signatures() {
        let a = Grid::new(vec![Cell::new(0, 0, "x")]);
        let b = Grid::new(vec![Cell::new(0, 0, "x")]);
        assert!(matches!(
            LiveTable::from_parts(a, b),
            Err(DataChefError::InvalidTableSignatures)
        ));
    }

    #[test]
    fn test_from_parts_with_copied_grid() {
        let pristine = Grid::new(vec![Cell::new(0, 0, "a"), Cell::new(1, 0, "b")]);
        let filtered = pristine.clone();
        let table = LiveTable::from_parts(pristine, filtered).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.selections_made());
    }

    #[test]
    fn test_with_filtered_matches_duplicate_readings_by_value() {
        let grid = Grid::new(vec![
            Cell::new(0, 0, "foo"),
            Cell::new(0, 0, "bar"),
            Cell::new(1, 0, "baz"),
        ]);
        let subset = grid.derived(vec![Cell::new(0, 0, "bar")]);
        let table = LiveTable::from_grid(grid).with_filtered(subset).unwrap();
        assert_eq!(table.lone_value().unwrap(), Some("bar"));
    }

    #[test]
    fn test_with_filtered_rejects_unknown_cells() {
        let grid = Grid::new(vec![Cell::new(0, 0, "foo")]);
        let stray = grid.derived(vec![Cell::new(3, 3, "nope")]);
        let err = LiveTable::from_grid(grid).with_filtered(stray).unwrap_err();
        assert!(matches!(err, DataChefError::OutOfBounds { ref shown, total: 1, .. } if shown == &vec![Coord::new(3, 3)]));
    }

    #[test]
    fn test_with_filtered_rejects_independent_grid() {
        let table = two_cell_table();
        let grid = Grid::new(vec![Cell::new(0, 0, "bar")]);
        assert!(matches!(
            table.with_filtered(grid),
            Err(DataChefError::InvalidTableSignatures)
        ));
    }

    #[test]
    fn test_display_limit_truncates_out_of_bounds_errors() {
        let table = block(2, 2).with_display_limit(2);
        let narrowed = table.excel_ref("A1").unwrap();
        assert_eq!(narrowed.display_limit(), 2);

        let err = narrowed.excel_ref("A1:D2").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("x:2, y:0 (C1)"));
        assert!(msg.contains("x:3, y:0 (D1)"));
        assert!(!msg.contains("(C2)"));
        assert!(msg.contains("truncated to 2 results from 4"));
    }

    #[test]
    fn test_display_limit_is_per_table() {
        let terse = block(1, 1).with_display_limit(1);
        let chatty = block(1, 1).with_display_limit(10);

        assert!(terse.excel_ref("A1:C1").unwrap_err().to_string().contains("truncated to 1 results from 2"));
        assert!(!chatty.excel_ref("A1:C1").unwrap_err().to_string().contains("truncated"));
        assert_eq!(block(1, 1).with_display_limit(0).display_limit(), 1);
    }

    #[test]
    fn test_display() {
        let table = block(2, 2).with_name("Sheet1");
        assert_eq!(table.to_string(), "Sheet1 [A1:B2] (4 cells)");
    }
}
