//! Main DataChef struct and public API.

use std::path::Path;

use crate::config::DataChefConfig;
use crate::error::Result;
use crate::input::{Reader, Source, SourceMetadata};
use crate::preview::{self, HtmlPreview, PreviewOptions, PreviewRenderer};
use crate::selection::{LiveTable, TableRegistry};

/// Entry point bundling configuration with acquisition and previews.
pub struct DataChef {
    config: DataChefConfig,
    reader: Reader,
    renderer: HtmlPreview,
}

impl DataChef {
    /// Create a new DataChef instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DataChefConfig::default())
    }

    /// Create a DataChef instance with custom configuration.
    ///
    /// Tables acquired through this instance list at most
    /// `display.bad_cells_to_display` missing cells in out-of-bounds errors.
    pub fn with_config(config: DataChefConfig) -> Self {
        let reader = Reader::new(config.reader.clone())
            .with_display_limit(config.display.bad_cells_to_display);
        let renderer =
            HtmlPreview::new().with_outlier_multiplier(config.display.outlier_multiplier);

        Self {
            config,
            reader,
            renderer,
        }
    }

    pub fn config(&self) -> &DataChefConfig {
        &self.config
    }

    /// Acquire every table of a source.
    ///
    /// Strings are resolved to a URL when they start with `http://` or
    /// `https://`, and to a local path otherwise.
    pub fn acquire(&self, source: impl Into<Source>) -> Result<TableRegistry> {
        self.acquire_with_metadata(source).map(|(registry, _)| registry)
    }

    /// Acquire every table of a source along with a description of it.
    pub fn acquire_with_metadata(
        &self,
        source: impl Into<Source>,
    ) -> Result<(TableRegistry, SourceMetadata)> {
        self.reader.read(&source.into())
    }

    /// Render selections as HTML without writing them anywhere.
    pub fn render_preview(
        &self,
        selections: &[LiveTable],
        options: &PreviewOptions,
    ) -> Result<String> {
        self.renderer.render(selections, options)
    }

    /// Write an HTML preview of selections to `path`.
    pub fn preview(
        &self,
        selections: &[LiveTable],
        options: &PreviewOptions,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        preview::render_to_file(&self.renderer, selections, options, path)
    }
}

impl Default for DataChef {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_acquire_csv() {
        let file = create_test_file("a,b,c\n1,2,3\n", ".csv");

        let chef = DataChef::new();
        let registry = chef.acquire(file.path()).unwrap();
        let table = registry.single().unwrap();

        assert_eq!(table.len(), 6);
        assert_eq!(table.excel_reference().unwrap(), "A1:C2");
        assert_eq!(
            table.source(),
            Some(file.path().display().to_string().as_str())
        );
    }

    #[test]
    fn test_acquire_with_metadata() {
        let file = create_test_file("{\"one\": [[1]], \"two\": [[2]]}", ".json");

        let chef = DataChef::new();
        let (registry, metadata) = chef.acquire_with_metadata(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(metadata.table_count, 2);
        assert!(metadata.hash.is_some());
    }

    #[test]
    fn test_configured_delimiter() {
        let file = create_test_file("a;b,c\nd;e,f\n", ".txt");

        let mut config = DataChefConfig::default();
        config.reader.delimiter = Some(',');
        let chef = DataChef::with_config(config);
        let table = chef.acquire(file.path()).unwrap().into_single().unwrap();

        assert_eq!(table.excel_ref("A1").unwrap().lone_value().unwrap(), Some("a;b"));
    }

    #[test]
    fn test_configured_display_limit_reaches_errors() {
        let file = create_test_file("a,b\nc,d\n", ".csv");

        let mut config = DataChefConfig::default();
        config.display.bad_cells_to_display = 2;
        let terse = DataChef::with_config(config);
        let chatty = DataChef::new();

        let err = terse
            .acquire(file.path())
            .unwrap()
            .into_single()
            .unwrap()
            .excel_ref("A1:D2")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("(C1)"));
        assert!(msg.contains("(D1)"));
        assert!(!msg.contains("(C2)"));
        assert!(msg.contains("truncated to 2 results from 4"));

        // A second instance keeps its own limit.
        let err = chatty
            .acquire(file.path())
            .unwrap()
            .into_single()
            .unwrap()
            .excel_ref("A1:D2")
            .unwrap_err();
        assert!(err.to_string().contains("(D2)"));
        assert!(!err.to_string().contains("truncated"));
    }

    #[test]
    fn test_preview_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("preview.html");

        let chef = DataChef::new();
        let table = chef
            .acquire(vec![vec![Some("x".to_string()), Some("y".to_string())]])
            .unwrap()
            .into_single()
            .unwrap();
        let selection = table.excel_ref("B1").unwrap();
        chef.preview(&[selection], &PreviewOptions::default(), &out)
            .unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<th>B</th>"));
        assert!(html.contains(">y</td>"));
    }
}
