//! County and type option lists.

use edumap::marker::MarkerIndex;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Which option list to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Counties,
    Types,
}

/// Print one option per line with its marker count.
pub fn run(runner: &CliRunner, listing: Listing) -> Result<(), CliError> {
    runner.log_startup(match listing {
        Listing::Counties => "counties",
        Listing::Types => "types",
    });
    let session = runner.load_session()?;

    if let Some(index) = session.index() {
        for (option, count) in options_with_counts(index, listing) {
            println!("{} ({})", option, count);
        }
    }

    Ok(())
}

fn options_with_counts(index: &MarkerIndex, listing: Listing) -> Vec<(&str, usize)> {
    match listing {
        Listing::Counties => index
            .all_counties()
            .into_iter()
            .map(|county| (county, index.markers_in_county(county).map_or(0, |m| m.len())))
            .collect(),
        Listing::Types => index
            .all_types()
            .into_iter()
            .map(|kind| (kind, index.markers_of_type(kind).map_or(0, |m| m.len())))
            .collect(),
    }
}
