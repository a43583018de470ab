//! Select command - apply the selection algebra and print the result.

use std::path::Path;

use colored::Colorize;
use datachef::LiveTable;
use serde_json::json;
use tracing::info;

use super::{load_chef, pick_table};

/// The operations requested on the command line.
#[derive(Debug, Default)]
pub struct SelectArgs {
    pub reference: String,
    pub minus: Vec<String>,
    pub plus: Vec<String>,
    pub intersect: Vec<String>,
}

pub fn run(
    file: String,
    args: SelectArgs,
    table: Option<String>,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chef = load_chef(config)?;
    let table = pick_table(chef.acquire(file.as_str())?, table.as_deref())?;
    let selection = apply(&table, &args)?;
    info!(cells = selection.len(), "selection complete");

    if json_output {
        let report = json!({
            "table": selection.name().ok(),
            "reference": selection.excel_reference().ok(),
            "count": selection.len(),
            "cells": selection.cells(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let extent = selection
        .excel_reference()
        .unwrap_or_else(|_| "empty".to_string());
    println!(
        "{} {} [{}]",
        selection.len().to_string().white().bold(),
        "cells selected".cyan(),
        extent
    );
    if !selection.is_empty() {
        println!("{}", selection.to_xy_string());
    }

    Ok(())
}

/// Resolve every reference against `table` and combine them in order.
pub fn apply(table: &LiveTable, args: &SelectArgs) -> datachef::Result<LiveTable> {
    let mut selection = table.excel_ref(&args.reference)?;
    for reference in &args.minus {
        selection = (&selection - &table.excel_ref(reference)?)?;
    }
    for reference in &args.plus {
        selection = (&selection | &table.excel_ref(reference)?)?;
    }
    for reference in &args.intersect {
        selection = (&selection & &table.excel_ref(reference)?)?;
    }
    Ok(selection)
}
