//! CSV/TSV parser with delimiter detection.

use std::collections::HashMap;

use crate::error::{DataChefError, Result};
use crate::model::{Cell, Grid};

/// Delimiters to try when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines inspected when auto-detecting.
const SAMPLE_LINES: usize = 20;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into a grid of cells.
///
/// There is no header row: every record becomes a row of cells, so the
/// first line of the file sits at `y = 0`.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse bytes into a grid, returning the delimiter that was used.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(Grid, u8)> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes, self.config.quote)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut cells = Vec::new();
        for (y, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if y >= max {
                    break;
                }
            }

            let record = result?;
            for (x, field) in record.iter().enumerate() {
                let value = (!field.is_empty()).then(|| field.to_string());
                cells.push(Cell::with_value(x, y, value));
            }
        }

        if cells.is_empty() {
            return Err(DataChefError::FileInput("No data rows found".to_string()));
        }

        Ok((Grid::new(cells), delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter that splits the most sample lines into the same
/// number of fields.
///
/// Without a header row, the first lines are often titles or notes with no
/// delimiter at all, so ragged lines lower a candidate's score instead of
/// ruling it out.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if lines.is_empty() {
        return Err(DataChefError::FileInput("No lines to analyze".to_string()));
    }

    let mut best = (b',', (0, 0));
    // Earlier delimiters win ties; tab is rare inside values.
    for &delim in DELIMITERS {
        let score = delimiter_score(&lines, delim, quote);
        if score > best.1 {
            best = (delim, score);
        }
    }

    Ok(best.0)
}

/// (lines sharing the most common width, that width) for one delimiter.
fn delimiter_score(lines: &[&str], delimiter: u8, quote: u8) -> (usize, usize) {
    let mut widths: HashMap<usize, usize> = HashMap::new();
    for line in lines {
        let fields = fields_in_line(line, delimiter, quote);
        if fields > 1 {
            *widths.entry(fields).or_default() += 1;
        }
    }

    widths
        .into_iter()
        .map(|(width, rows)| (rows, width))
        .max()
        .unwrap_or((0, 0))
}

/// Number of fields `line` splits into, ignoring delimiters inside quotes.
fn fields_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let mut in_quotes = false;
    1 + line
        .bytes()
        .filter(|&b| {
            if b == quote {
                in_quotes = !in_quotes;
            }
            b == delimiter && !in_quotes
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"\"a,b\";c\n\"d,e\";f";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_tolerates_title_lines() {
        let data = b"Prices 2024\nitem;price\ntea;2,5\ncake;3,0\n";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_tab_on_ties() {
        let data = b"a\tb, with comma\n1\t2";
        assert_eq!(detect_delimiter(data, b'"').unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_single_column_defaults_to_comma() {
        assert_eq!(detect_delimiter(b"one\ntwo\n", b'"').unwrap(), b',');
    }

    #[test]
    fn test_fields_in_line() {
        assert_eq!(fields_in_line("a,b,c", b',', b'"'), 3);
        assert_eq!(fields_in_line("'a,b',c", b',', b'\''), 2);
        assert_eq!(fields_in_line("abc", b',', b'"'), 1);
    }

    #[test]
    fn test_parse_has_no_header_row() {
        let parser = Parser::new();
        let (grid, delimiter) = parser.parse_bytes(b"name,age\nAlice,30\nBob,25").unwrap();

        assert_eq!(delimiter, b',');
        assert_eq!(grid.len(), 6);
        let first = &grid.cells()[0];
        assert_eq!((first.x(), first.y(), first.value()), (0, 0, Some("name")));
        let last = &grid.cells()[5];
        assert_eq!((last.x(), last.y(), last.value()), (1, 2, Some("25")));
    }

    #[test]
    fn test_parse_empty_fields_and_ragged_rows() {
        let parser = Parser::new();
        let (grid, _) = parser.parse_bytes(b"a,,c\nd\n").unwrap();
        let values: Vec<_> = grid.cells().iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![Some("a"), None, Some("c"), Some("d")]);
    }

    #[test]
    fn test_parse_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let (grid, _) = parser.parse_bytes(b"a,b\nc,d\ne,f").unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b"\n\n"),
            Err(DataChefError::FileInput(_))
        ));
    }
}
