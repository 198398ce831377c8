//! Marker index with county and type lookup tables.

use std::collections::{BTreeSet, HashMap};

use super::entry::{MarkerEntry, MarkerId};
use super::palette::TypePalette;
use crate::dataset::LocationRecord;

/// Owner of all markers of one load, plus lookup tables for filtering.
///
/// - `by_county` and `by_type` give O(1) access to the markers of one key.
/// - Name search has no table; it is a linear scan over [`iter`](Self::iter).
///
/// Building never fails. An empty record list yields an empty index.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    entries: Vec<MarkerEntry>,
    by_county: HashMap<String, BTreeSet<MarkerId>>,
    by_type: HashMap<String, BTreeSet<MarkerId>>,
}

impl MarkerIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one marker per record, in record order.
    pub fn build(records: impl IntoIterator<Item = LocationRecord>, palette: &TypePalette) -> Self {
        let mut index = Self::new();

        for (position, record) in records.into_iter().enumerate() {
            let id = MarkerId(position);
            let entry = MarkerEntry::from_record(id, record, palette);

            index
                .by_county
                .entry(entry.county().to_string())
                .or_default()
                .insert(id);
            index
                .by_type
                .entry(entry.kind().to_string())
                .or_default()
                .insert(id);
            index.entries.push(entry);
        }

        tracing::info!(
            markers = index.entries.len(),
            counties = index.by_county.len(),
            types = index.by_type.len(),
            "Built marker index"
        );

        index
    }

    /// Get a marker by id.
    pub fn get(&self, id: MarkerId) -> Option<&MarkerEntry> {
        self.entries.get(id.0)
    }

    /// Returns the number of markers in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all markers in load order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerEntry> {
        self.entries.iter()
    }

    /// Ids of every marker.
    pub fn all_ids(&self) -> BTreeSet<MarkerId> {
        self.entries.iter().map(MarkerEntry::id).collect()
    }

    /// Markers of one county (exact, case-sensitive match).
    pub fn markers_in_county(&self, county: &str) -> Option<&BTreeSet<MarkerId>> {
        self.by_county.get(county)
    }

    /// Markers of one type (exact match).
    pub fn markers_of_type(&self, kind: &str) -> Option<&BTreeSet<MarkerId>> {
        self.by_type.get(kind)
    }

    /// Distinct counties, sorted lexicographically.
    pub fn all_counties(&self) -> Vec<&str> {
        sorted_keys(&self.by_county)
    }

    /// Distinct types, sorted lexicographically.
    pub fn all_types(&self) -> Vec<&str> {
        sorted_keys(&self.by_type)
    }

    /// Number of distinct counties.
    pub fn county_count(&self) -> usize {
        self.by_county.len()
    }
}

fn sorted_keys(table: &HashMap<String, BTreeSet<MarkerId>>) -> Vec<&str> {
    let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}
