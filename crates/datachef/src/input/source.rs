//! Data source abstraction and metadata.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Row-major cell values; `None` is an empty cell.
pub type Rows = Vec<Vec<Option<String>>>;

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A single in-memory table.
    Rows(Rows),
    /// Named in-memory tables, in order.
    Sheets(IndexMap<String, Rows>),
    /// A local file.
    Path(PathBuf),
    /// A remote file fetched over HTTP(S).
    Url(String),
}

impl Source {
    /// Interpret a string as a URL or a local path.
    pub fn resolve(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    /// Human readable description used as the table source.
    pub fn describe(&self) -> String {
        match self {
            Source::Rows(_) => "<rows>".to_string(),
            Source::Sheets(_) => "<sheets>".to_string(),
            Source::Path(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<&str> for Source {
    fn from(location: &str) -> Self {
        Source::resolve(location)
    }
}

impl From<String> for Source {
    fn from(location: String) -> Self {
        Source::resolve(&location)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<Rows> for Source {
    fn from(rows: Rows) -> Self {
        Source::Rows(rows)
    }
}

impl From<IndexMap<String, Rows>> for Source {
    fn from(sheets: IndexMap<String, Rows>) -> Self {
        Source::Sheets(sheets)
    }
}

/// File formats a source can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// CSV, TSV and other delimiter separated text.
    Delimited,
    /// A JSON array of rows or object of named sheets.
    Json,
    /// Built in memory.
    Memory,
}

impl Format {
    /// Format for a file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" | "txt" | "psv" => Some(Format::Delimited),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Format::Delimited => "delimited",
            Format::Json => "json",
            Format::Memory => "memory",
        };
        f.write_str(s)
    }
}

/// Metadata about an acquired source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path, empty for in-memory sources.
    pub file: String,
    /// Path or URL the data was read from.
    pub location: String,
    /// SHA-256 hash of the raw bytes.
    pub hash: Option<String>,
    /// Size of the raw bytes.
    pub size_bytes: Option<u64>,
    /// Format the source was read as.
    pub format: Format,
    /// Number of tables found.
    pub table_count: usize,
    /// When the source was acquired.
    pub acquired_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Metadata for raw bytes read from `location`.
    pub fn for_bytes(location: &str, bytes: &[u8], format: Format, table_count: usize) -> Self {
        let file = location
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            file,
            location: location.to_string(),
            hash: Some(hash_bytes(bytes)),
            size_bytes: Some(bytes.len() as u64),
            format,
            table_count,
            acquired_at: Utc::now(),
        }
    }

    /// Metadata for tables built in memory.
    pub fn in_memory(table_count: usize) -> Self {
        Self {
            file: String::new(),
            location: "<memory>".to_string(),
            hash: None,
            size_bytes: None,
            format: Format::Memory,
            table_count,
            acquired_at: Utc::now(),
        }
    }
}

/// `sha256:`-prefixed hex digest.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}
