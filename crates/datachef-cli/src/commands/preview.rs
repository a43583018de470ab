//! Preview command - write an HTML preview of labelled selections.

use std::path::{Path, PathBuf};

use colored::Colorize;
use datachef::{Boundary, LiveTable, PreviewOptions, Source, label};
use tracing::info;

use super::{load_chef, pick_table};

pub fn run(
    file: String,
    selections: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    table: Option<String>,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chef = load_chef(config)?;
    let table = pick_table(chef.acquire(file.as_str())?, table.as_deref())?;

    let selections = selections
        .iter()
        .map(|spec| labelled_selection(&table, spec))
        .collect::<datachef::Result<Vec<_>>>()?;
    let options = PreviewOptions {
        start: start.as_deref().map(Boundary::parse).transpose()?,
        end: end.as_deref().map(Boundary::parse).transpose()?,
    };

    let output = output.unwrap_or_else(|| default_output(&file));
    chef.preview(&selections, &options, &output)?;
    info!(path = %output.display(), selections = selections.len(), "preview written");

    println!(
        "{} {}",
        "Preview written to".green().bold(),
        output.display().to_string().white()
    );
    Ok(())
}

/// Resolve `"REF"` or `"REF=LABEL"` against `table`.
fn labelled_selection(table: &LiveTable, spec: &str) -> datachef::Result<LiveTable> {
    match spec.split_once('=') {
        Some((reference, text)) => Ok(label(&table.excel_ref(reference.trim())?, text.trim())),
        None => table.excel_ref(spec.trim()),
    }
}

/// `<file>.preview.html` next to a local file, or in the working directory for URLs.
fn default_output(file: &str) -> PathBuf {
    match Source::resolve(file) {
        Source::Path(path) => {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            path.with_file_name(format!("{}.preview.html", stem))
        }
        _ => {
            let without_query = file.split(['?', '#']).next().unwrap_or(file);
            let last = without_query
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default();
            let stem = Path::new(last)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "datachef".to_string());
            PathBuf::from(format!("{}.preview.html", stem))
        }
    }
}
