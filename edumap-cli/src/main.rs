//! EduMap CLI - Command-line interface
//!
//! Loads the institution CSV and answers the questions the map answers:
//! how many institutions, which counties and types, and which markers are
//! visible for a given filter.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::filter::FilterArgs;
use commands::listing::Listing;
use commands::repair::RepairArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "edumap")]
#[command(version = edumap::VERSION)]
#[command(about = "Educational institutions of Romania on a map", long_about = None)]
struct Cli {
    /// CSV file path or http(s) URL (overrides data.source)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Print debug logs to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and show totals and rejected rows
    Summary,

    /// List counties with their institution counts
    Counties,

    /// List institution types with their counts
    Types,

    /// Show the institutions visible for a county/type/name filter
    Filter(FilterArgs),

    /// Rebuild coordinates that lost their decimal point
    Repair(RepairArgs),

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    // Config commands need neither logging nor a dataset
    let command = match cli.command {
        Commands::Config { command } => return commands::config::run(command),
        other => other,
    };

    let runner = CliRunner::new(cli.source, cli.debug)?;

    match command {
        Commands::Summary => commands::summary::run(&runner),
        Commands::Counties => commands::listing::run(&runner, Listing::Counties),
        Commands::Types => commands::listing::run(&runner, Listing::Types),
        Commands::Filter(args) => commands::filter::run(&runner, args),
        Commands::Repair(args) => commands::repair::run(runner.config(), args),
        Commands::Config { command } => commands::config::run(command),
    }
}
