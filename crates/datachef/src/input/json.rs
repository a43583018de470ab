//! JSON workbooks: an array of rows, or an object of named sheets.

use serde_json::Value;

use crate::error::{DataChefError, Result};
use crate::model::{Cell, Grid};

/// One table read from a JSON document.
#[derive(Debug)]
pub struct JsonTable {
    /// Sheet name, `None` for a bare array of rows.
    pub name: Option<String>,
    pub grid: Grid,
}

/// Parse a JSON document into tables.
///
/// ```text
/// [["a", "b"], ["c", null]]                 one unnamed table
/// {"Sheet1": [["a"]], "Sheet2": [[1, 2]]}   one table per key, key order kept
/// ```
pub fn parse_bytes(bytes: &[u8], max_rows: Option<usize>) -> Result<Vec<JsonTable>> {
    let document: Value = serde_json::from_slice(bytes)?;

    match document {
        Value::Array(rows) => Ok(vec![JsonTable {
            name: None,
            grid: Grid::new(rows_to_cells(&rows, None, max_rows)?),
        }]),
        Value::Object(sheets) => {
            if sheets.is_empty() {
                return Err(DataChefError::FileInput(
                    "JSON workbook contains no sheets".to_string(),
                ));
            }
            sheets
                .iter()
                .map(|(name, rows)| {
                    let Value::Array(rows) = rows else {
                        return Err(DataChefError::FileInput(format!(
                            "sheet '{}' must be an array of rows",
                            name
                        )));
                    };
                    Ok(JsonTable {
                        name: Some(name.clone()),
                        grid: Grid::new(rows_to_cells(rows, Some(name), max_rows)?),
                    })
                })
                .collect()
        }
        other => Err(DataChefError::FileInput(format!(
            "expected an array of rows or an object of sheets, found {}",
            kind(&other)
        ))),
    }
}

fn rows_to_cells(rows: &[Value], sheet: Option<&str>, max_rows: Option<usize>) -> Result<Vec<Cell>> {
    let limit = max_rows.unwrap_or(usize::MAX);
    let mut cells = Vec::new();

    for (y, row) in rows.iter().take(limit).enumerate() {
        let Value::Array(values) = row else {
            return Err(DataChefError::FileInput(format!(
                "row {} must be an array, found {}",
                y + 1,
                kind(row)
            )));
        };
        for (x, value) in values.iter().enumerate() {
            let cell = Cell::with_value(x, y, scalar(value, x, y)?);
            cells.push(match sheet {
                Some(name) => cell.in_sheet(name),
                None => cell,
            });
        }
    }

    Ok(cells)
}

fn scalar(value: &Value, x: usize, y: usize) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(DataChefError::FileInput(format!(
            "cell {} holds a nested {}",
            crate::selection::to_reference(x, y),
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
