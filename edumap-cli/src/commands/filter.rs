//! Marker filtering from the command line.

use std::path::PathBuf;

use clap::Args;
use edumap::export::FeatureCollection;
use edumap::filter::FilterState;
use edumap::marker::MarkerEntry;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the `filter` command.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only show institutions in this county (exact match)
    #[arg(long, default_value = "")]
    pub county: String,

    /// Only show institutions of this type (exact match)
    #[arg(long = "type", default_value = "")]
    pub kind: String,

    /// Case-insensitive text to look for in institution names
    #[arg(long, default_value = "")]
    pub search: String,

    /// Write the visible markers as GeoJSON to this file
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}

impl FilterArgs {
    fn state(&self) -> FilterState {
        FilterState::new()
            .with_county(&self.county)
            .with_kind(&self.kind)
            .with_search(&self.search)
    }
}

/// Print the markers visible under the given filters.
pub fn run(runner: &CliRunner, args: FilterArgs) -> Result<(), CliError> {
    runner.log_startup("filter");
    let mut session = runner.load_session()?;

    session.apply_filter(args.state());

    for marker in session.visible_markers() {
        println!("{}", format_marker(marker));
    }

    let stats = session.stats();
    println!();
    println!("{} of {} institutions visible", stats.visible, stats.total);

    if let (Some(path), Some(index)) = (&args.geojson, session.index()) {
        FeatureCollection::from_markers(index, session.visible()).write_to(path)?;
        println!("GeoJSON written to {}", path.display());
    }

    Ok(())
}

fn format_marker(marker: &MarkerEntry) -> String {
    let (latitude, longitude) = marker.position();
    format!(
        "{} | {} | {} | {:.6}, {:.6}",
        marker.name(),
        marker.county(),
        marker.kind(),
        latitude,
        longitude
    )
}
