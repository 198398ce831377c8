//! GeoJSON export of visible markers.
//!
//! The output is a standard `FeatureCollection` of `Point` features. Any
//! web map library (Leaflet, OpenLayers, MapLibre) can draw it directly.
//! Coordinates follow GeoJSON order: `[longitude, latitude]`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::VisibleSet;
use crate::marker::{MarkerEntry, MarkerIndex};

/// Errors raised while writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

/// GeoJSON `Feature` for one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: MarkerProperties,
}

/// GeoJSON `Point` geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// Display attributes carried by each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerProperties {
    pub name: String,
    pub county: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub label: String,
    pub popup: String,
    pub tooltip: String,
}

impl From<&MarkerEntry> for Feature {
    fn from(marker: &MarkerEntry) -> Self {
        let (latitude, longitude) = marker.position();
        Self {
            kind: "Feature".to_string(),
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: [longitude, latitude],
            },
            properties: MarkerProperties {
                name: marker.name().to_string(),
                county: marker.county().to_string(),
                kind: marker.kind().to_string(),
                color: marker.icon().color.clone(),
                label: marker.icon().label.clone(),
                popup: marker.popup().to_string(),
                tooltip: marker.tooltip().to_string(),
            },
        }
    }
}

impl FeatureCollection {
    /// Collect the visible markers of an index, in marker order.
    ///
    /// Ids missing from the index are skipped.
    pub fn from_markers(index: &MarkerIndex, visible: &VisibleSet) -> Self {
        Self::from_entries(visible.iter().filter_map(|id| index.get(*id)))
    }

    /// Collect features from any sequence of markers.
    pub fn from_entries<'a>(markers: impl IntoIterator<Item = &'a MarkerEntry>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features: markers.into_iter().map(Feature::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the collection to a file, replacing it.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ExportError::Write {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::info!(
            path = %path.display(),
            features = self.features.len(),
            "Wrote GeoJSON export"
        );
        Ok(())
    }
}
