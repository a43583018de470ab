//! Acquiring tables from files, URLs and in-memory rows.

mod json;
mod parser;
mod remote;
mod source;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{DEFAULT_BAD_CELLS_TO_DISPLAY, ReaderConfig};
use crate::error::{DataChefError, Result};
use crate::model::{Cell, Grid};
use crate::selection::{LiveTable, TableRegistry};

pub use json::JsonTable;
pub use parser::{Parser, ParserConfig};
pub use source::{Format, Rows, Source, SourceMetadata, hash_bytes};

/// Reads any [`Source`] into live tables.
#[derive(Debug, Clone)]
pub struct Reader {
    config: ReaderConfig,
    display_limit: usize,
}

impl Reader {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            display_limit: DEFAULT_BAD_CELLS_TO_DISPLAY,
        }
    }

    /// Set how many missing cells out-of-bounds errors on acquired tables list.
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    /// Acquire every table of `source`.
    ///
    /// Each table starts with all of its cells selected and carries the
    /// source description; sheets and JSON object keys become table names.
    pub fn read(&self, source: &Source) -> Result<(TableRegistry, SourceMetadata)> {
        let location = source.describe();
        let (tables, metadata) = match source {
            Source::Rows(rows) => {
                let grid = Grid::new(rows_to_cells(rows, None, self.config.max_rows));
                (vec![LiveTable::from_grid(grid)], SourceMetadata::in_memory(1))
            }
            Source::Sheets(sheets) => {
                if sheets.is_empty() {
                    return Err(DataChefError::FileInput("no sheets were provided".to_string()));
                }
                let tables = sheets
                    .iter()
                    .map(|(name, rows)| {
                        let grid = Grid::new(rows_to_cells(rows, Some(name.as_str()), self.config.max_rows));
                        LiveTable::from_grid(grid).with_name(name.as_str())
                    })
                    .collect::<Vec<_>>();
                let count = tables.len();
                (tables, SourceMetadata::in_memory(count))
            }
            Source::Path(path) => {
                let format = local_format(path)?;
                let bytes = fs::read(path).map_err(|e| DataChefError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                self.parse(&location, &bytes, format)?
            }
            Source::Url(url) => {
                let format = remote::format_for_url(url);
                let bytes = remote::fetch(url)?;
                self.parse(&location, &bytes, format)?
            }
        };

        debug!(
            source = %location,
            format = %metadata.format,
            tables = metadata.table_count,
            hash = metadata.hash.as_deref().unwrap_or("-"),
            "acquired"
        );

        let tables = tables
            .into_iter()
            .map(|t| {
                t.with_source(location.as_str())
                    .with_display_limit(self.display_limit)
            })
            .collect();
        Ok((TableRegistry::new(tables), metadata))
    }

    fn parse(
        &self,
        location: &str,
        bytes: &[u8],
        format: Format,
    ) -> Result<(Vec<LiveTable>, SourceMetadata)> {
        let tables = match format {
            Format::Json => json::parse_bytes(bytes, self.config.max_rows)?
                .into_iter()
                .map(|JsonTable { name, grid }| {
                    let table = LiveTable::from_grid(grid);
                    match name {
                        Some(name) => table.with_name(name),
                        None => table,
                    }
                })
                .collect(),
            Format::Delimited | Format::Memory => {
                let parser = Parser::with_config(self.parser_config()?);
                let (grid, delimiter) = parser.parse_bytes(bytes)?;
                let shown = (delimiter as char).escape_default().to_string();
                debug!(delimiter = %shown, "parsed delimited text");
                vec![LiveTable::from_grid(grid)]
            }
        };
        let metadata = SourceMetadata::for_bytes(location, bytes, format, tables.len());
        Ok((tables, metadata))
    }

    fn parser_config(&self) -> Result<ParserConfig> {
        let delimiter = self
            .config
            .delimiter
            .map(|d| {
                u8::try_from(d).map_err(|_| {
                    DataChefError::Config(format!(
                        "reader.delimiter must be a single ASCII character, got '{}'",
                        d
                    ))
                })
            })
            .transpose()?;
        Ok(ParserConfig {
            delimiter,
            max_rows: self.config.max_rows,
            ..ParserConfig::default()
        })
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

fn local_format(path: &Path) -> Result<Format> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::from_extension)
        .ok_or_else(|| {
            DataChefError::UnsupportedLocalFile(format!(
                "'{}' is not a csv, tsv, txt, psv or json file",
                path.display()
            ))
        })
}

fn rows_to_cells(rows: &Rows, sheet: Option<&str>, max_rows: Option<usize>) -> Vec<Cell> {
    rows.iter()
        .take(max_rows.unwrap_or(usize::MAX))
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, value)| {
                let cell = Cell::with_value(x, y, value.clone());
                match sheet {
                    Some(name) => cell.in_sheet(name),
                    None => cell,
                }
            })
        })
        .collect()
}
