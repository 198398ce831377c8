//! Map layer abstraction.
//!
//! The filter engine never draws anything itself. It hands markers to a
//! [`MapLayer`], which is the only mutation surface towards the map widget.

use std::collections::BTreeSet;

use crate::marker::{MarkerEntry, MarkerId};

/// Rendering target for markers.
///
/// Implementations forward to a map widget (or record calls in tests).
/// Calls are fire-and-forget; nothing is returned to the engine.
pub trait MapLayer {
    /// Draw a marker.
    fn add_marker(&mut self, marker: &MarkerEntry);

    /// Stop drawing a marker.
    fn remove_marker(&mut self, marker: &MarkerEntry);
}

/// In-memory layer that tracks which markers are drawn.
///
/// Used by the CLI and tests; also counts add/remove calls so callers can
/// observe how much work a filter change caused.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    shown: BTreeSet<MarkerId>,
    adds: usize,
    removes: usize,
}

impl MarkerLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the marker is currently drawn.
    pub fn contains(&self, id: MarkerId) -> bool {
        self.shown.contains(&id)
    }

    /// Ids of the drawn markers.
    pub fn shown(&self) -> &BTreeSet<MarkerId> {
        &self.shown
    }

    /// Number of drawn markers.
    pub fn len(&self) -> usize {
        self.shown.len()
    }

    /// Returns true if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    /// Total `add_marker` calls so far.
    pub fn add_count(&self) -> usize {
        self.adds
    }

    /// Total `remove_marker` calls so far.
    pub fn remove_count(&self) -> usize {
        self.removes
    }
}

impl MapLayer for MarkerLayer {
    fn add_marker(&mut self, marker: &MarkerEntry) {
        self.adds += 1;
        self.shown.insert(marker.id());
    }

    fn remove_marker(&mut self, marker: &MarkerEntry) {
        self.removes += 1;
        self.shown.remove(&marker.id());
    }
}
