//! Closest-label lookups along a row or column.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::ops::Bound;

use crate::error::{DataChefError, Result};
use crate::model::{Cell, Located};
use crate::selection::LiveTable;

use super::LookupEngine;

/// Where a label sits relative to the cells it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
    Left,
    Right,
}

impl Direction {
    fn is_vertical(self) -> bool {
        matches!(self, Direction::Above | Direction::Below)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Above => "above",
            Direction::Below => "below",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

/// Resolves a cell to the nearest label strictly in one direction.
///
/// Labels are indexed by the line they sit on (their column for
/// `Above`/`Below`, their row for `Left`/`Right`) and then by position
/// along it, so each lookup is a single range query.
#[derive(Debug, Clone)]
pub struct DirectLookup {
    direction: Direction,
    lines: HashMap<usize, BTreeMap<usize, Option<String>>>,
}

impl DirectLookup {
    /// Index the selected cells of `labels`.
    ///
    /// When several label readings share a coordinate the first one is kept.
    pub fn new(labels: &LiveTable, direction: Direction) -> Self {
        let mut lines: HashMap<usize, BTreeMap<usize, Option<String>>> = HashMap::new();
        for cell in labels {
            let coord = cell.coord();
            let (line, position) = if direction.is_vertical() {
                (coord.x, coord.y)
            } else {
                (coord.y, coord.x)
            };
            lines
                .entry(line)
                .or_default()
                .entry(position)
                .or_insert_with(|| cell.value().map(String::from));
        }
        Self { direction, lines }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl LookupEngine for DirectLookup {
    fn resolve(&self, cell: &Cell) -> Result<String> {
        let coord = cell.coord();
        let (line, position) = if self.direction.is_vertical() {
            (coord.x, coord.y)
        } else {
            (coord.y, coord.x)
        };

        let found = self.lines.get(&line).and_then(|labels| match self.direction {
            Direction::Above | Direction::Left => labels.range(..position).next_back(),
            Direction::Below | Direction::Right => labels
                .range((Bound::Excluded(position), Bound::Unbounded))
                .next(),
        });

        match found {
            Some((_, value)) => Ok(value.clone().unwrap_or_default()),
            None => Err(DataChefError::LookupFailed(format!(
                "no label {} cell {}",
                self.direction,
                cell.reference()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grid;

    /// ```text
    ///      A      B      C
    /// 1    Year   2023   2024
    /// 2    Sales  10     20
    /// 3    Cost   4
    /// ```
    fn table() -> LiveTable {
        LiveTable::from_grid(Grid::from_rows(vec![
            vec![Some("Year".to_string()), Some("2023".to_string()), Some("2024".to_string())],
            vec![Some("Sales".to_string()), Some("10".to_string()), Some("20".to_string())],
            vec![Some("Cost".to_string()), Some("4".to_string()), None],
        ]))
    }

    fn cell(table: &LiveTable, reference: &str) -> Cell {
        table.excel_ref(reference).unwrap().cells()[0].clone()
    }

    #[test]
    fn test_above() {
        let table = table();
        let years = table.excel_ref("B1:C1").unwrap();
        let lookup = DirectLookup::new(&years, Direction::Above);
        assert_eq!(lookup.resolve(&cell(&table, "C3")).unwrap(), "2024");
        assert_eq!(lookup.resolve(&cell(&table, "B2")).unwrap(), "2023");
    }

    #[test]
    fn test_left() {
        let table = table();
        let measures = table.excel_ref("A2:A3").unwrap();
        let lookup = DirectLookup::new(&measures, Direction::Left);
        assert_eq!(lookup.resolve(&cell(&table, "C2")).unwrap(), "Sales");
        assert_eq!(lookup.resolve(&cell(&table, "B3")).unwrap(), "Cost");
    }

    #[test]
    fn test_closest_label_wins() {
        let table = table();
        let column = table.excel_ref("A1:A2").unwrap();
        let lookup = DirectLookup::new(&column, Direction::Above);
        assert_eq!(lookup.resolve(&cell(&table, "A3")).unwrap(), "Sales");
    }

    #[test]
    fn test_below_and_right() {
        let table = table();
        let bottom = table.excel_ref("A3:C3").unwrap();
        let below = DirectLookup::new(&bottom, Direction::Below);
        assert_eq!(below.resolve(&cell(&table, "A1")).unwrap(), "Cost");
        assert_eq!(below.resolve(&cell(&table, "C1")).unwrap(), "");

        let last_column = table.excel_ref("C1:C3").unwrap();
        let right = DirectLookup::new(&last_column, Direction::Right);
        assert_eq!(right.resolve(&cell(&table, "A1")).unwrap(), "2024");
    }

    #[test]
    fn test_label_must_be_strictly_in_direction() {
        let table = table();
        let years = table.excel_ref("B1:C1").unwrap();
        let lookup = DirectLookup::new(&years, Direction::Above);
        assert!(matches!(
            lookup.resolve(&cell(&table, "B1")),
            Err(DataChefError::LookupFailed(_))
        ));
        assert!(matches!(
            lookup.resolve(&cell(&table, "A2")),
            Err(DataChefError::LookupFailed(msg)) if msg.contains("A2")
        ));
    }
}
