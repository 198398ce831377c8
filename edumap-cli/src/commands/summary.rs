//! Dataset summary command.

use edumap::dataset::ParseReport;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Rejected rows listed before the output is truncated.
const MAX_LISTED_REJECTIONS: usize = 10;

/// Load the dataset and print totals.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("summary");
    let session = runner.load_session()?;

    let stats = session.stats();
    println!("Source:     {}", runner.data_source());
    println!("Unități:    {}", stats.total);
    println!("Județe:     {}", stats.counties);
    println!("Tipuri:     {}", session.type_options().len());

    if let Some(loaded) = session.dataset() {
        if loaded.repaired > 0 {
            println!("Repaired:   {} coordinate cells", loaded.repaired);
        }
        print_report(&loaded.report);
    }

    Ok(())
}

fn print_report(report: &ParseReport) {
    println!(
        "Rows:       {} read, {} accepted, {} rejected",
        report.total_rows,
        report.accepted,
        report.rejected_count()
    );

    if report.rejected.is_empty() {
        return;
    }

    println!();
    for rejected in report.rejected.iter().take(MAX_LISTED_REJECTIONS) {
        println!("  row {}: {}", rejected.row, rejected.reason);
    }
    if report.rejected_count() > MAX_LISTED_REJECTIONS {
        println!(
            "  ... and {} more",
            report.rejected_count() - MAX_LISTED_REJECTIONS
        );
    }
}
