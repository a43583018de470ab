//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// DataChef: select and preview cells of tabular data
#[derive(Parser)]
#[command(name = "datachef")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatChoice::Pretty)]
    pub log_format: LogFormatChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tables of a source
    Inspect {
        /// Path or http(s) URL of the source (csv, tsv, txt, psv, json)
        #[arg(value_name = "FILE")]
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select cells and print them
    ///
    /// Every --minus is applied first, then every --plus, then every --intersect.
    Select {
        /// Path or http(s) URL of the source
        #[arg(value_name = "FILE")]
        file: String,

        /// Starting selection, e.g. "A1:D10"
        #[arg(value_name = "REF")]
        reference: String,

        /// Remove the cells of a reference from the selection
        #[arg(long, value_name = "REF")]
        minus: Vec<String>,

        /// Add the cells of a reference to the selection
        #[arg(long, value_name = "REF")]
        plus: Vec<String>,

        /// Keep only the cells also inside a reference
        #[arg(long, value_name = "REF")]
        intersect: Vec<String>,

        /// Table to select from when the source has several
        #[arg(short, long)]
        table: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an HTML preview of one or more selections
    Preview {
        /// Path or http(s) URL of the source
        #[arg(value_name = "FILE")]
        file: String,

        /// Selection to highlight, optionally labelled: "B2:D9=Observations"
        #[arg(short, long = "select", value_name = "REF[=LABEL]", required = true)]
        selections: Vec<String>,

        /// Top-left corner: a reference or "selection"
        #[arg(long)]
        start: Option<String>,

        /// Bottom-right corner: a reference or "selection"
        #[arg(long)]
        end: Option<String>,

        /// Table to preview when the source has several
        #[arg(short, long)]
        table: Option<String>,

        /// Output path (default: <file>.preview.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogFormatChoice {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from([
            "datachef", "-vv", "select", "data.csv", "A1:Z2", "--minus", "A1:Z1", "--plus", "A1",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Select {
                reference,
                minus,
                plus,
                ..
            } => {
                assert_eq!(reference, "A1:Z2");
                assert_eq!(minus, vec!["A1:Z1"]);
                assert_eq!(plus, vec!["A1"]);
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_preview_requires_a_selection() {
        assert!(Cli::try_parse_from(["datachef", "preview", "data.csv"]).is_err());
        assert!(
            Cli::try_parse_from(["datachef", "preview", "data.csv", "-s", "A1", "-s", "B2=Body"])
                .is_ok()
        );
    }
}
