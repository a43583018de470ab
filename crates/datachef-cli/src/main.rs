//! DataChef CLI - select and preview cells of tabular data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands, LogFormatChoice};
use commands::select::SelectArgs;
use logging::{LogConfig, LogFormat};

fn main() {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatChoice::Pretty => LogFormat::Pretty,
        LogFormatChoice::Compact => LogFormat::Compact,
    };
    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(format);
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(file, json, config),

        Commands::Select {
            file,
            reference,
            minus,
            plus,
            intersect,
            table,
            json,
        } => commands::select::run(
            file,
            SelectArgs {
                reference,
                minus,
                plus,
                intersect,
            },
            table,
            json,
            config,
        ),

        Commands::Preview {
            file,
            selections,
            start,
            end,
            table,
            output,
        } => commands::preview::run(file, selections, start, end, table, output, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
