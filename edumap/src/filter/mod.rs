//! Marker filtering by county, type and name.
//!
//! A marker is visible iff every active filter accepts it:
//!
//! 1. county is empty, or equals the marker's county (case-sensitive)
//! 2. type is empty, or equals the marker's type
//! 3. search text is empty, or is a case-insensitive substring of the name
//!
//! [`select`] computes the visible set without side effects. The
//! [`FilterEngine`] additionally keeps track of what is currently drawn on a
//! [`MapLayer`] and only adds or removes the markers whose visibility changed.
//!
//! # Example
//!
//! ```
//! use edumap::dataset::LocationRecord;
//! use edumap::filter::{select, FilterState};
//! use edumap::marker::{MarkerIndex, TypePalette};
//!
//! let index = MarkerIndex::build(
//!     vec![LocationRecord::new("Cluj", "Liceul Teoretic Ion Agârbiceanu", "Liceu", 46.55, 23.57)],
//!     &TypePalette::default(),
//! );
//!
//! assert_eq!(select(&index, &FilterState::new().with_county("Cluj")).len(), 1);
//! assert!(select(&index, &FilterState::new().with_county("Timiș")).is_empty());
//! ```

mod engine;
mod layer;

use std::collections::BTreeSet;

pub use engine::{FilterEngine, VisibilityDelta};
pub use layer::{MapLayer, MarkerLayer};

use crate::marker::{MarkerId, MarkerIndex};

/// Set of visible markers. Ordering carries no meaning.
pub type VisibleSet = BTreeSet<MarkerId>;

/// Current filter selections. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected county, or empty for all counties.
    pub county: String,
    /// Selected type, or empty for all types.
    pub kind: String,
    /// Free-text search over names, or empty.
    pub search: String,
}

impl FilterState {
    /// State with no active filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_county(mut self, county: &str) -> Self {
        self.county = county.to_string();
        self
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    /// Returns true if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.county.is_empty() && self.kind.is_empty() && self.search.is_empty()
    }

    /// Clear all three fields.
    pub fn clear(&mut self) {
        self.county.clear();
        self.kind.clear();
        self.search.clear();
    }
}

/// Compute the visible markers for a filter state.
///
/// County and type use the index tables; the name search scans the remaining
/// candidates. Search text is compared in Unicode lowercase, untrimmed.
pub fn select(index: &MarkerIndex, state: &FilterState) -> VisibleSet {
    let county = non_empty(&state.county);
    let kind = non_empty(&state.kind);

    let mut visible = match (county, kind) {
        (Some(county), Some(kind)) => {
            match (index.markers_in_county(county), index.markers_of_type(kind)) {
                (Some(in_county), Some(of_type)) => {
                    in_county.intersection(of_type).copied().collect()
                }
                _ => VisibleSet::new(),
            }
        }
        (Some(county), None) => index.markers_in_county(county).cloned().unwrap_or_default(),
        (None, Some(kind)) => index.markers_of_type(kind).cloned().unwrap_or_default(),
        (None, None) => index.all_ids(),
    };

    let needle = state.search.to_lowercase();
    if !needle.is_empty() {
        visible.retain(|id| {
            index
                .get(*id)
                .is_some_and(|marker| marker.matches_search(&needle))
        });
    }

    visible
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests;
