//! Library configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataChefError, Result};

/// Default number of offending cells enumerated in error messages.
pub const DEFAULT_BAD_CELLS_TO_DISPLAY: usize = 5;

/// Default IQR multiplier for outlier diagnostics.
pub const DEFAULT_OUTLIER_MULTIPLIER: f64 = 1.5;

/// Reader configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Delimiter to use for delimited files (None = auto-detect).
    pub delimiter: Option<char>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

/// Display and diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum offending cells listed in an error message.
    pub bad_cells_to_display: usize,
    /// IQR multiplier used when flagging outlying cells.
    pub outlier_multiplier: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bad_cells_to_display: DEFAULT_BAD_CELLS_TO_DISPLAY,
            outlier_multiplier: DEFAULT_OUTLIER_MULTIPLIER,
        }
    }
}

/// Configuration for datachef.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataChefConfig {
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

impl DataChefConfig {
    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DataChefError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: DataChefConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that configured values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.display.bad_cells_to_display == 0 {
            return Err(DataChefError::Config(
                "display.bad_cells_to_display must be at least 1".to_string(),
            ));
        }
        if !(self.display.outlier_multiplier > 0.0) {
            return Err(DataChefError::Config(format!(
                "display.outlier_multiplier must be positive, got {}",
                self.display.outlier_multiplier
            )));
        }
        if let Some(d) = self.reader.delimiter {
            if !d.is_ascii() {
                return Err(DataChefError::Config(format!(
                    "reader.delimiter must be a single ASCII character, got '{}'",
                    d
                )));
            }
        }
        Ok(())
    }
}
