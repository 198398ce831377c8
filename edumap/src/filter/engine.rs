//! Visibility reconciliation between filter results and a map layer.

use super::layer::MapLayer;
use super::{select, FilterState, VisibleSet};
use crate::marker::{MarkerId, MarkerIndex};

/// Markers whose visibility changed in one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDelta {
    /// Newly visible markers, added to the layer.
    pub added: Vec<MarkerId>,
    /// Newly hidden markers, removed from the layer.
    pub removed: Vec<MarkerId>,
}

impl VisibilityDelta {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Keeps a map layer in sync with the current filter state.
///
/// The engine remembers which markers it has drawn. Each pass touches only
/// the markers whose visibility changed; the end state is the same as a full
/// redraw.
#[derive(Debug, Default)]
pub struct FilterEngine {
    rendered: VisibleSet,
}

impl FilterEngine {
    /// Create an engine with nothing drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently drawn by this engine.
    pub fn visible(&self) -> &VisibleSet {
        &self.rendered
    }

    /// Apply a filter state and reconcile the layer.
    pub fn apply<L: MapLayer + ?Sized>(
        &mut self,
        index: &MarkerIndex,
        state: &FilterState,
        layer: &mut L,
    ) -> VisibilityDelta {
        let next = select(index, state);

        let delta = VisibilityDelta {
            added: next.difference(&self.rendered).copied().collect(),
            removed: self.rendered.difference(&next).copied().collect(),
        };

        for marker in delta.removed.iter().filter_map(|id| index.get(*id)) {
            layer.remove_marker(marker);
        }
        for marker in delta.added.iter().filter_map(|id| index.get(*id)) {
            layer.add_marker(marker);
        }

        tracing::debug!(
            visible = next.len(),
            added = delta.added.len(),
            removed = delta.removed.len(),
            "Applied marker filter"
        );

        self.rendered = next;
        delta
    }

    /// Clear every filter field and show all markers.
    pub fn reset<L: MapLayer + ?Sized>(
        &mut self,
        index: &MarkerIndex,
        state: &mut FilterState,
        layer: &mut L,
    ) -> VisibilityDelta {
        state.clear();
        self.apply(index, state, layer)
    }

    /// Remove every drawn marker from the layer.
    ///
    /// `index` must be the index the markers were drawn from; call this before
    /// replacing it on reload.
    pub fn clear<L: MapLayer + ?Sized>(&mut self, index: &MarkerIndex, layer: &mut L) {
        for marker in self.rendered.iter().filter_map(|id| index.get(*id)) {
            layer.remove_marker(marker);
        }
        self.rendered.clear();
    }
}
