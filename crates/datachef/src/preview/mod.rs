//! Previews of selections for visual verification.

mod html;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{DataChefError, Result};
use crate::model::Coord;
use crate::selection::{CellRange, LiveTable, from_reference};

pub use html::HtmlPreview;

/// Attach a display label to a selection.
pub fn label(selection: &LiveTable, text: impl Into<String>) -> LiveTable {
    selection.clone().with_label(text)
}

/// One corner of the previewed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A fixed cell.
    Reference(Coord),
    /// The extent of the selections being previewed.
    Selection,
}

impl Boundary {
    /// Parse `"selection"` or a single cell reference such as `"B4"`.
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("selection") {
            return Ok(Boundary::Selection);
        }
        from_reference(s.trim()).map(Boundary::Reference)
    }
}

impl FromStr for Boundary {
    type Err = DataChefError;

    fn from_str(s: &str) -> Result<Self> {
        Boundary::parse(s)
    }
}

/// Region of the table a preview shows.
///
/// Unset corners default to the corners of the first selection's table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub start: Option<Boundary>,
    pub end: Option<Boundary>,
}

impl PreviewOptions {
    /// Work out the rectangle to render.
    pub fn bounds(&self, selections: &[LiveTable]) -> Result<CellRange> {
        let first = selections.first().ok_or_else(|| {
            DataChefError::EmptySelection("nothing to preview, no selections given".to_string())
        })?;
        let table = CellRange::bounding(first.pristine_cells())?;

        let selected = || -> Result<CellRange> {
            let mut extent: Option<CellRange> = None;
            for selection in selections.iter().filter(|s| !s.is_empty()) {
                let range = CellRange::bounding(&selection.cells())?;
                extent = Some(match extent {
                    Some(e) => e.union(&range),
                    None => range,
                });
            }
            extent.ok_or_else(|| {
                DataChefError::EmptySelection("every selection to preview is empty".to_string())
            })
        };

        let start = match self.start {
            None => table.start(),
            Some(Boundary::Reference(coord)) => coord,
            Some(Boundary::Selection) => selected()?.start(),
        };
        let end = match self.end {
            None => table.end(),
            Some(Boundary::Reference(coord)) => coord,
            Some(Boundary::Selection) => selected()?.end(),
        };
        Ok(CellRange::new(start, end))
    }
}

/// Renders selections into a document.
pub trait PreviewRenderer {
    /// Render `selections` over the region described by `options`.
    fn render(&self, selections: &[LiveTable], options: &PreviewOptions) -> Result<String>;
}

/// Render selections with `renderer` and write the document to `path`.
pub fn render_to_file(
    renderer: &dyn PreviewRenderer,
    selections: &[LiveTable],
    options: &PreviewOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let document = renderer.render(selections, options)?;
    fs::write(path, document).map_err(|e| DataChefError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
