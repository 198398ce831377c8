//! Coordinate repair of a CSV file.

use std::path::{Path, PathBuf};

use clap::Args;
use edumap::config::ConfigFile;
use edumap::dataset::repair_csv;
use tracing::info;

use crate::error::CliError;

/// Arguments for the `repair` command.
#[derive(Debug, Args)]
pub struct RepairArgs {
    /// CSV file to read
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the repaired CSV
    #[arg(long)]
    pub output: PathBuf,

    /// Integer digits before the decimal point (default: repair.integer_digits)
    #[arg(long)]
    pub digits: Option<usize>,
}

/// Rewrite the coordinate columns of a CSV file.
pub fn run(config: &ConfigFile, args: RepairArgs) -> Result<(), CliError> {
    let digits = args.digits.unwrap_or(config.repair.integer_digits);
    if digits == 0 {
        return Err(CliError::Config(
            "--digits must be a positive integer".to_string(),
        ));
    }

    let text = std::fs::read_to_string(&args.input).map_err(|e| CliError::FileRead {
        path: display(&args.input),
        error: e,
    })?;

    let output = repair_csv(&text, &config.columns, digits).map_err(CliError::Repair)?;

    std::fs::write(&args.output, &output.text).map_err(|e| CliError::FileWrite {
        path: display(&args.output),
        error: e,
    })?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        repaired = output.repaired,
        unrepairable = output.unrepairable,
        "Repair finished"
    );

    println!("Repaired {} coordinate cells", output.repaired);
    if output.unrepairable > 0 {
        println!(
            "{} cells could not be repaired and will be rejected on load",
            output.unrepairable
        );
    }
    println!("Written to {}", args.output.display());

    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
