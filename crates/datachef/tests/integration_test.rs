//! Integration tests for acquisition and previews.

use std::fs;
use std::io::Write;

use indexmap::IndexMap;
use tempfile::{NamedTempFile, TempDir};

use datachef::lookup::{DirectLookup, Direction, LookupEngine};
use datachef::{
    Boundary, DataChef, DataChefError, PreviewOptions, Source, acquire, label, preview,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn rows(values: &[&[&str]]) -> Vec<Vec<Option<String>>> {
    values
        .iter()
        .map(|r| {
            r.iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect()
        })
        .collect()
}

// =============================================================================
// Acquisition Tests
// =============================================================================

#[test]
fn test_acquire_csv_every_line_is_cells() {
    let content = "region,2023,2024\n\
                   north,10,12\n\
                   south,,9\n";
    let file = create_test_file(content, ".csv");

    let table = acquire(file.path())
        .expect("Acquire failed")
        .into_single()
        .expect("Expected one table");

    assert_eq!(table.excel_reference().unwrap(), "A1:C3");
    assert_eq!(table.excel_ref("A1").unwrap().lone_value().unwrap(), Some("region"));
    assert_eq!(table.excel_ref("B3").unwrap().lone_value().unwrap(), None);
    assert!(matches!(table.name(), Err(DataChefError::UnnamedTable)));
}

#[test]
fn test_acquire_tsv_auto_detect() {
    let content = "a\tb, with comma\n1\t2\n";
    let file = create_test_file(content, ".tsv");

    let table = acquire(file.path()).unwrap().into_single().unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(
        table.excel_ref("B1").unwrap().lone_value().unwrap(),
        Some("b, with comma")
    );
}

#[test]
fn test_acquire_json_workbook() {
    let content = r#"{
        "Prices": [["item", "price"], ["tea", 2.5], ["cake", null]],
        "Notes": [["source: survey"]]
    }"#;
    let file = create_test_file(content, ".json");

    let registry = acquire(file.path()).unwrap();
    assert_eq!(registry.names(), vec!["Prices", "Notes"]);

    let prices = registry.table("Prices").unwrap();
    assert_eq!(prices.excel_reference().unwrap(), "A1:B3");
    assert_eq!(prices.excel_ref("B2").unwrap().lone_value().unwrap(), Some("2.5"));

    let names: Vec<&str> = registry
        .iter()
        .unwrap()
        .map(|t| t.name().unwrap())
        .collect();
    assert_eq!(names, vec!["Prices", "Notes"]);
    assert!(matches!(
        registry.single(),
        Err(DataChefError::MultipleTables(2))
    ));
}

#[test]
fn test_acquire_unsupported_extension() {
    let file = create_test_file("whatever", ".xlsx");
    assert!(matches!(
        acquire(file.path()),
        Err(DataChefError::UnsupportedLocalFile(_))
    ));
}

#[test]
fn test_acquire_in_memory_sheets() {
    let mut sheets = IndexMap::new();
    sheets.insert("one".to_string(), rows(&[&["a", "b"]]));
    sheets.insert("two".to_string(), rows(&[&["c"], &["d"]]));

    let registry = acquire(Source::Sheets(sheets)).unwrap();
    let two = registry.table("two").unwrap();
    assert_eq!(two.excel_reference().unwrap(), "A1:A2");
    assert!(matches!(
        registry.table("three"),
        Err(DataChefError::NoSuchTable(_))
    ));
}

#[test]
fn test_acquisitions_of_same_file_do_not_align() {
    let file = create_test_file("a,b\n", ".csv");
    let first = acquire(file.path()).unwrap().into_single().unwrap();
    let second = acquire(file.path()).unwrap().into_single().unwrap();

    assert_ne!(first.signature(), second.signature());
    assert!(matches!(
        &first - &second,
        Err(DataChefError::UnalignedTableOperation)
    ));
}

// =============================================================================
// Preview Tests
// =============================================================================

#[test]
fn test_preview_labelled_selections() {
    let content = "item,price\ntea,2.5\ncake,3\n";
    let file = create_test_file(content, ".csv");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.html");

    let table = acquire(file.path()).unwrap().into_single().unwrap();
    let header = table.excel_ref("A1:B1").unwrap();
    let body = (&table - &header).unwrap();

    preview(
        &[label(&header, "Header"), label(&body, "Observations & more")],
        &PreviewOptions::default(),
        &out,
    )
    .expect("Preview failed");

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Header"));
    assert!(html.contains("Observations &amp; more"));
    assert!(html.contains(">cake</td>"));
    assert!(html.contains("<th>3</th>"));
    assert!(!html.contains("<th>4</th>"));
}

#[test]
fn test_preview_bounds_to_selection() {
    let table = acquire(rows(&[
        &["a", "b", "c", "d"],
        &["e", "f", "g", "h"],
        &["i", "j", "k", "l"],
    ]))
    .unwrap()
    .into_single()
    .unwrap();
    let middle = table.excel_ref("B2:C2").unwrap();

    let options = PreviewOptions {
        start: Some(Boundary::parse("selection").unwrap()),
        end: Some(Boundary::parse("selection").unwrap()),
    };
    let html = DataChef::new().render_preview(&[middle], &options).unwrap();

    assert!(html.contains("<th>B</th>"));
    assert!(!html.contains("<th>A</th>"));
    assert!(!html.contains("<th>D</th>"));
    assert!(html.contains(">f</td>"));
    assert!(!html.contains(">a</td>"));
}

#[test]
fn test_preview_nothing() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        preview(&[], &PreviewOptions::default(), dir.path().join("x.html")),
        Err(DataChefError::EmptySelection(_))
    ));
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_headers_for_observations() {
    let table = acquire(rows(&[
        &["", "2023", "2024"],
        &["north", "10", "12"],
        &["south", "7", "9"],
    ]))
    .unwrap()
    .into_single()
    .unwrap();

    let years = DirectLookup::new(&table.excel_ref("B1:C1").unwrap(), Direction::Above);
    let regions = DirectLookup::new(&table.excel_ref("A2:A3").unwrap(), Direction::Left);
    let observations = table.excel_ref("B2:C3").unwrap();

    let resolved: Vec<(String, String, String)> = observations
        .iter()
        .map(|cell| {
            (
                years.resolve(cell).unwrap(),
                regions.resolve(cell).unwrap(),
                cell.value().unwrap_or_default().to_string(),
            )
        })
        .collect();

    assert_eq!(resolved[0], ("2023".into(), "north".into(), "10".into()));
    assert_eq!(resolved[3], ("2024".into(), "south".into(), "9".into()));
}
