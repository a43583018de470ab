//! DataChef: cell selection over tabular data sources.
//!
//! A source (CSV, JSON workbook, URL or in-memory rows) is acquired into one
//! or more live tables. Each live table keeps the table exactly as acquired
//! alongside the cells currently selected from it, so selections can be
//! narrowed, widened and combined without ever drifting from their origin.
//!
//! # Core Principles
//!
//! - **Pure operators**: selecting never mutates a table, it returns a new one
//! - **Aligned operands**: selections from different tables never combine
//! - **Verifiable**: any set of selections can be previewed as HTML
//!
//! # Example
//!
//! ```no_run
//! use datachef::{PreviewOptions, acquire, label, preview};
//!
//! let table = acquire("prices.csv")?.into_single()?;
//! let header = table.excel_ref("A1:Z1")?;
//! let body = (&table - &header)?;
//!
//! println!("{}", body.excel_reference()?);
//! preview(
//!     &[label(&header, "Header"), label(&body, "Observations")],
//!     &PreviewOptions::default(),
//!     "prices.preview.html",
//! )?;
//! # Ok::<(), datachef::DataChefError>(())
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod lookup;
pub mod model;
pub mod preview;
pub mod selection;

mod datachef;

use std::path::Path;

pub use crate::datachef::DataChef;
pub use config::DataChefConfig;
pub use error::{DataChefError, Result};
pub use input::{Source, SourceMetadata};
pub use lookup::{DirectLookup, Direction, LookupEngine};
pub use model::{Cell, Coord, Grid, Located, Signature};
pub use preview::{Boundary, HtmlPreview, PreviewOptions, PreviewRenderer, label};
pub use selection::{CellRange, LiveTable, TableRegistry};

/// Acquire every table of a source with the default configuration.
pub fn acquire(source: impl Into<Source>) -> Result<TableRegistry> {
    DataChef::new().acquire(source)
}

/// Write an HTML preview of selections with the default configuration.
pub fn preview(
    selections: &[LiveTable],
    options: &PreviewOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    DataChef::new().preview(selections, options, path)
}
