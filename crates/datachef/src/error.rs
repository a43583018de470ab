//! Error types for the datachef library.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Coord;

/// Main error type for datachef operations.
#[derive(Debug, Error)]
pub enum DataChefError {
    /// A reference string does not match the `[A-Z]+[0-9]+` grammar.
    #[error("Malformed cell reference: '{0}'")]
    MalformedReference(String),

    /// Requested coordinates are absent from the table being selected from.
    #[error("{}", describe_missing(.shown, *.total, *.display_limit))]
    OutOfBounds {
        /// The first missing coordinates, at most `display_limit` of them.
        shown: Vec<Coord>,
        /// How many requested coordinates are missing in all.
        total: u128,
        /// How many missing coordinates the message enumerates.
        display_limit: usize,
    },

    /// A selection expected to be a solid rectangle is not.
    #[error("Selection is not rectangular: {cells} distinct cells inside a bounding box of {expected}")]
    NonRectangular { cells: usize, expected: u128 },

    /// A binary operator was given selections taken from different tables.
    #[error(
        "Cannot combine selections taken from different tables. \
         Both operands must be derived from the same acquired table"
    )]
    UnalignedTableOperation,

    /// Pristine and filtered grids do not share a signature.
    #[error("Pristine and filtered tables have different signatures")]
    InvalidTableSignatures,

    /// An extent query was made on zero cells.
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// The name/title of a table was accessed before being set.
    #[error(
        "Cannot find table name/title property as this table does not have one. \
         This is typical of (but not exclusive to) csv tables"
    )]
    UnnamedTable,

    /// No table with the given name exists in the input.
    #[error("No table named '{0}' in this input")]
    NoSuchTable(String),

    /// Iteration was attempted on an input holding exactly one table.
    #[error("You cannot iterate this input, as it only consists of a single table")]
    IteratingSingleTable,

    /// A single table was requested from an input holding several.
    #[error("This input consists of {0} tables, select one by name")]
    MultipleTables(usize),

    /// `lone_value` was called on a selection that is not exactly one cell.
    #[error("You can only use lone_value() on a selection of exactly one cell. This selection has {0}")]
    LoneValueOnMultipleCells(usize),

    /// A lookup engine found no related cell.
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Something is wrong with what has been provided as an input.
    #[error("File input error: {0}")]
    FileInput(String),

    /// A local file of an unsupported type was given.
    #[error("Unsupported local file: {0}")]
    UnsupportedLocalFile(String),

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error fetching a remote source.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataChefError {
    /// Build an out-of-bounds error from every missing coordinate.
    pub fn out_of_bounds(missing: Vec<Coord>, display_limit: usize) -> Self {
        let total = missing.len() as u128;
        let mut shown = missing;
        shown.truncate(display_limit);
        DataChefError::OutOfBounds {
            shown,
            total,
            display_limit,
        }
    }
}

fn describe_missing(shown: &[Coord], total: u128, display_limit: usize) -> String {
    let mut msg =
        String::from("You are trying to select cells that do not exist in the table:");
    for coord in shown.iter().take(display_limit) {
        msg.push_str(&format!("\n{}", coord));
    }
    if total > display_limit as u128 {
        msg.push_str(&format!(
            "\nExamples of missing cells truncated to {} results from {}",
            display_limit, total
        ));
    }
    msg
}

/// Result type alias for datachef operations.
pub type Result<T> = std::result::Result<T, DataChefError>;
