//! Map session: the owner of all view state.
//!
//! A [`MapSession`] holds the map layer, the currently loaded dataset, the
//! filter selections and the last user-visible notice. User actions arrive as
//! trigger calls (`set_county`, `set_type`, `set_search`, `reset`); each one
//! reconciles marker visibility on the layer before returning.
//!
//! Loading happens outside the session. The caller awaits
//! [`Loader::load`](crate::loader::Loader::load) and hands the outcome to
//! [`MapSession::complete_load`], so the session itself never suspends.

use std::fmt;

use tracing::{info, warn};

use crate::dataset::ParseReport;
use crate::filter::{FilterEngine, FilterState, MapLayer, VisibilityDelta, VisibleSet};
use crate::loader::{LoadError, LoadedDataset};
use crate::marker::{MarkerEntry, MarkerIndex};

/// User-visible message about the last load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The last load failed; the previous dataset (if any) is still shown.
    LoadFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed(reason) => write!(f, "Eroare la încărcare date: {}", reason),
        }
    }
}

/// Counters shown next to the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Markers in the loaded dataset.
    pub total: usize,
    /// Distinct counties in the loaded dataset.
    pub counties: usize,
    /// Markers visible under the current filters.
    pub visible: usize,
}

/// View state for one map.
pub struct MapSession<L: MapLayer> {
    layer: L,
    dataset: Option<LoadedDataset>,
    state: FilterState,
    engine: FilterEngine,
    notice: Option<Notice>,
}

impl<L: MapLayer> MapSession<L> {
    /// Create a session with nothing loaded.
    pub fn new(layer: L) -> Self {
        Self {
            layer,
            dataset: None,
            state: FilterState::new(),
            engine: FilterEngine::new(),
            notice: None,
        }
    }

    /// Apply the outcome of a load.
    ///
    /// On success the previous markers are removed from the layer, the filters
    /// are cleared and every new marker is drawn. On failure a notice is
    /// recorded and everything else is left as it was.
    ///
    /// Returns true if the dataset was replaced.
    pub fn complete_load(&mut self, outcome: Result<LoadedDataset, LoadError>) -> bool {
        match outcome {
            Ok(loaded) => {
                if let Some(previous) = self.dataset.take() {
                    self.engine.clear(&previous.index, &mut self.layer);
                }
                self.state.clear();
                self.notice = None;

                info!(
                    source = %loaded.source,
                    markers = loaded.index.len(),
                    counties = loaded.index.county_count(),
                    "Session dataset replaced"
                );

                self.dataset = Some(loaded);
                self.refresh();
                true
            }
            Err(e) => {
                warn!(error = %e, "Keeping previous dataset after failed load");
                self.notice = Some(Notice::LoadFailed(e.to_string()));
                false
            }
        }
    }

    /// Select a county (empty for all).
    pub fn set_county(&mut self, county: &str) -> VisibilityDelta {
        self.state.county = county.to_string();
        self.refresh()
    }

    /// Select a type (empty for all).
    pub fn set_type(&mut self, kind: &str) -> VisibilityDelta {
        self.state.kind = kind.to_string();
        self.refresh()
    }

    /// Set the name search text.
    pub fn set_search(&mut self, search: &str) -> VisibilityDelta {
        self.state.search = search.to_string();
        self.refresh()
    }

    /// Apply all three filter fields at once.
    pub fn apply_filter(&mut self, state: FilterState) -> VisibilityDelta {
        self.state = state;
        self.refresh()
    }

    /// Clear every filter and show all markers.
    pub fn reset(&mut self) -> VisibilityDelta {
        match &self.dataset {
            Some(loaded) => self
                .engine
                .reset(&loaded.index, &mut self.state, &mut self.layer),
            None => {
                self.state.clear();
                VisibilityDelta::default()
            }
        }
    }

    fn refresh(&mut self) -> VisibilityDelta {
        match &self.dataset {
            Some(loaded) => self
                .engine
                .apply(&loaded.index, &self.state, &mut self.layer),
            None => VisibilityDelta::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        match &self.dataset {
            Some(loaded) => SessionStats {
                total: loaded.index.len(),
                counties: loaded.index.county_count(),
                visible: self.engine.visible().len(),
            },
            None => SessionStats::default(),
        }
    }

    /// Counties for the county selector, sorted.
    pub fn county_options(&self) -> Vec<&str> {
        self.index().map(MarkerIndex::all_counties).unwrap_or_default()
    }

    /// Types for the type selector, sorted.
    pub fn type_options(&self) -> Vec<&str> {
        self.index().map(MarkerIndex::all_types).unwrap_or_default()
    }

    /// Message from the last failed load, cleared by the next success.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Ids of the markers currently drawn.
    pub fn visible(&self) -> &VisibleSet {
        self.engine.visible()
    }

    /// Markers currently drawn, in load order.
    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerEntry> {
        let index = self.index();
        self.engine
            .visible()
            .iter()
            .filter_map(move |id| index.and_then(|index| index.get(*id)))
    }

    pub fn index(&self) -> Option<&MarkerIndex> {
        self.dataset.as_ref().map(|loaded| &loaded.index)
    }

    /// Parse report of the loaded dataset.
    pub fn report(&self) -> Option<&ParseReport> {
        self.dataset.as_ref().map(|loaded| &loaded.report)
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }
}
