//! Inspect command - list the tables of a source.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::load_chef;

pub fn run(
    file: String,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chef = load_chef(config)?;
    let (registry, metadata) = chef.acquire_with_metadata(file.as_str())?;

    if json_output {
        let tables: Vec<_> = registry
            .tables()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name().ok(),
                    "cells": t.len(),
                    "reference": t.excel_reference().ok(),
                })
            })
            .collect();
        let report = json!({
            "source": metadata,
            "tables": tables,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Source:".cyan().bold(), metadata.location.white());
    println!("  Format: {}", metadata.format);
    if let Some(hash) = &metadata.hash {
        println!("  Hash:   {}", hash.dimmed());
    }
    if let Some(size) = metadata.size_bytes {
        println!("  Size:   {} bytes", size);
    }
    println!();

    println!("{} ({})", "Tables".cyan().bold(), registry.len());
    for (i, table) in registry.tables().iter().enumerate() {
        let name = table.name().unwrap_or("(unnamed)");
        let extent = table
            .excel_reference()
            .unwrap_or_else(|_| "empty".to_string());
        println!(
            "  {}. {} [{}] {} cells",
            i + 1,
            name.white().bold(),
            extent,
            table.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_on_json_workbook() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"one": [["a"]], "two": [["b", "c"]]}"#)
            .unwrap();
        let path = file.path().display().to_string();

        assert!(run(path.clone(), true, None).is_ok());
        assert!(run(path, false, None).is_ok());
    }

    #[test]
    fn test_run_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv").display().to_string();
        assert!(run(missing, false, None).is_err());
    }
}
