//! Self-contained HTML rendering of selections.

use std::collections::HashMap;

use indexmap::IndexMap;
use quick_xml::escape::escape;
use tracing::warn;

use crate::config::DEFAULT_OUTLIER_MULTIPLIER;
use crate::error::{DataChefError, Result};
use crate::model::{Coord, Located};
use crate::selection::algebra::ordered_coordinates;
use crate::selection::{LiveTable, reference};

use super::{PreviewOptions, PreviewRenderer};

/// Background colours assigned to selections in order, then reused.
const PALETTE: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd",
];

const STYLE: &str = "body { font-family: sans-serif; font-size: 13px; }
table { border-collapse: collapse; }
.grid td, .grid th { border: 1px solid #ccc; padding: 2px 6px; white-space: nowrap; }
.grid th { background: #f2f2f2; font-weight: normal; color: #555; }
.legend td { padding: 2px 6px; }
.swatch { width: 24px; border: 1px solid #999; }
.warnings { color: #a94442; }";

/// Renders selections over their table as a coloured HTML grid.
#[derive(Debug, Clone)]
pub struct HtmlPreview {
    outlier_multiplier: f64,
}

impl HtmlPreview {
    pub fn new() -> Self {
        Self {
            outlier_multiplier: DEFAULT_OUTLIER_MULTIPLIER,
        }
    }

    /// Use a different IQR multiplier for outlier warnings.
    pub fn with_outlier_multiplier(mut self, multiplier: f64) -> Self {
        self.outlier_multiplier = multiplier;
        self
    }

    fn warnings(&self, selections: &[LiveTable], names: &[String]) -> Vec<String> {
        let mut claims: IndexMap<Coord, Vec<usize>> = IndexMap::new();
        for (i, selection) in selections.iter().enumerate() {
            for coord in ordered_coordinates(&selection.cells()) {
                claims.entry(coord).or_default().push(i);
            }
        }

        let mut warnings: Vec<String> = claims
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(coord, owners)| {
                let owners: Vec<&str> = owners.iter().map(|&i| names[i].as_str()).collect();
                format!("Cell {} is claimed by {}", coord.reference(), owners.join(", "))
            })
            .collect();

        for (name, selection) in names.iter().zip(selections) {
            let outliers = selection.outliers(self.outlier_multiplier);
            if outliers.is_empty() {
                continue;
            }
            let refs: Vec<String> = outliers.iter().map(|c| c.reference()).collect();
            warn!(selection = %name, cells = %refs.join(" "), "selection has outlying cells");
            warnings.push(format!(
                "{} has {} outlying cell(s): {}",
                name,
                outliers.len(),
                refs.join(", ")
            ));
        }

        warnings
    }
}

impl Default for HtmlPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewRenderer for HtmlPreview {
    fn render(&self, selections: &[LiveTable], options: &PreviewOptions) -> Result<String> {
        let bounds = options.bounds(selections)?;
        let first = &selections[0];
        if selections.iter().any(|s| s.signature() != first.signature()) {
            return Err(DataChefError::UnalignedTableOperation);
        }

        let names: Vec<String> = selections
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.label()
                    .map(String::from)
                    .unwrap_or_else(|| format!("Selection {}", i + 1))
            })
            .collect();

        // First reading of each coordinate wins.
        let mut values: HashMap<Coord, Option<&str>> = HashMap::new();
        for cell in first.pristine_cells() {
            values.entry(cell.coord()).or_insert(cell.value());
        }

        let mut colour_of: HashMap<Coord, &str> = HashMap::new();
        for (i, selection) in selections.iter().enumerate() {
            let colour = PALETTE[i % PALETTE.len()];
            for cell in selection {
                colour_of.entry(cell.coord()).or_insert(colour);
            }
        }

        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>datachef preview</title>\n");
        html.push_str(&format!("<style>\n{}\n</style>\n</head>\n<body>\n", STYLE));

        if let Ok(name) = first.name() {
            html.push_str(&format!("<h2>{}</h2>\n", escape(name)));
        }

        html.push_str("<table class=\"legend\">\n");
        for (i, name) in names.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td class=\"swatch\" style=\"background-color: {}\">&nbsp;</td><td>{}</td></tr>\n",
                PALETTE[i % PALETTE.len()],
                escape(name.as_str())
            ));
        }
        html.push_str("</table>\n");

        let warnings = self.warnings(selections, &names);
        if !warnings.is_empty() {
            html.push_str("<ul class=\"warnings\">\n");
            for warning in &warnings {
                html.push_str(&format!("<li>{}</li>\n", escape(warning.as_str())));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<table class=\"grid\">\n<tr><th></th>");
        for x in bounds.start().x..=bounds.end().x {
            html.push_str(&format!("<th>{}</th>", reference::column_letters(x)));
        }
        html.push_str("</tr>\n");

        for y in bounds.start().y..=bounds.end().y {
            html.push_str(&format!("<tr><th>{}</th>", y + 1));
            for x in bounds.start().x..=bounds.end().x {
                let coord = Coord::new(x, y);
                let value = values.get(&coord).copied().flatten().unwrap_or("");
                match colour_of.get(&coord) {
                    Some(colour) => html.push_str(&format!(
                        "<td style=\"background-color: {}\">{}</td>",
                        colour,
                        escape(value)
                    )),
                    None => html.push_str(&format!("<td>{}</td>", escape(value))),
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n</body>\n</html>\n");

        Ok(html)
    }
}
