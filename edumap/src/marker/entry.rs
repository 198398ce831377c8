//! Marker entry type definitions.

use std::fmt;

use super::palette::{short_label, TypePalette};
use super::popup::popup_html;
use crate::dataset::LocationRecord;

/// Stable identifier of a marker inside one [`MarkerIndex`](super::MarkerIndex).
///
/// Equal to the position of the source record in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub usize);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Icon handed to the map widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDescriptor {
    /// CSS color (e.g., "#e74c3c").
    pub color: String,
    /// Short text drawn on the icon (e.g., "ȘG").
    pub label: String,
}

/// Renderable and filterable projection of one institution.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntry {
    id: MarkerId,
    record: LocationRecord,
    icon: IconDescriptor,
    popup: String,
    name_key: String,
}

impl MarkerEntry {
    /// Derive a marker from a record.
    pub(crate) fn from_record(id: MarkerId, record: LocationRecord, palette: &TypePalette) -> Self {
        let icon = IconDescriptor {
            color: palette.color_for(&record.kind).to_string(),
            label: short_label(&record.kind),
        };
        let popup = popup_html(&record);
        let name_key = record.name.to_lowercase();

        Self {
            id,
            record,
            icon,
            popup,
            name_key,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// The record this marker was built from.
    pub fn record(&self) -> &LocationRecord {
        &self.record
    }

    pub fn county(&self) -> &str {
        &self.record.county
    }

    pub fn kind(&self) -> &str {
        &self.record.kind
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Marker position as `(latitude, longitude)`.
    pub fn position(&self) -> (f64, f64) {
        (self.record.latitude, self.record.longitude)
    }

    pub fn icon(&self) -> &IconDescriptor {
        &self.icon
    }

    /// Popup HTML.
    pub fn popup(&self) -> &str {
        &self.popup
    }

    /// Tooltip text (the institution name).
    pub fn tooltip(&self) -> &str {
        &self.record.name
    }

    /// Lowercased name used for search.
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    /// True if `needle` (already lowercased) occurs in the name.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name_key.contains(needle)
    }
}
