//! CLI command implementations.

pub mod inspect;
pub mod preview;
pub mod select;

use std::path::Path;

use datachef::{DataChef, DataChefConfig, LiveTable, TableRegistry};
use tracing::debug;

/// Build the library entry point, reading `config` when given.
pub fn load_chef(config: Option<&Path>) -> Result<DataChef, Box<dyn std::error::Error>> {
    match config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Ok(DataChef::with_config(DataChefConfig::from_json_file(path)?))
        }
        None => Ok(DataChef::new()),
    }
}

/// The named table, or the only table when no name is given.
pub fn pick_table(
    registry: TableRegistry,
    table: Option<&str>,
) -> Result<LiveTable, Box<dyn std::error::Error>> {
    match table {
        Some(name) => Ok(registry.table(name)?.clone()),
        None => {
            if registry.len() > 1 {
                return Err(format!(
                    "this source has {} tables ({}), choose one with --table",
                    registry.len(),
                    registry.names().join(", ")
                )
                .into());
            }
            Ok(registry.into_single()?)
        }
    }
}
