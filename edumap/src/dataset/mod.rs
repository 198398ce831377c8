//! Institution dataset loaded from CSV.
//!
//! This module turns the raw CSV published by the data provider into validated
//! [`LocationRecord`]s. Each row carries a county, an institution name, an
//! institution type and a coordinate pair.
//!
//! # Data Source
//!
//! The CSV is expected to have a header row. Header names differ between data
//! revisions (`Latitude` vs `Latitudine`, `County` vs `Judet`), so columns are
//! resolved through a [`ColumnMapping`] instead of fixed names.
//!
//! # Example
//!
//! ```
//! use edumap::dataset::{CsvParser, ColumnMapping, BoundingBox};
//!
//! let csv = "County,Name,Type,Latitude,Longitude\n\
//!            Cluj,Liceul Teoretic Ion Agârbiceanu,Liceu,46.55,23.57\n";
//!
//! let parser = CsvParser::new(ColumnMapping::default(), BoundingBox::default());
//! let dataset = parser.parse(csv).unwrap();
//! assert_eq!(dataset.records.len(), 1);
//! assert_eq!(dataset.records[0].county, "Cluj");
//! ```

mod parser;
mod repair;

pub use parser::{
    ColumnMapping, CsvParser, Field, ParseError, ParseReport, ParsedDataset, RejectReason,
    RejectedRow,
};
pub use repair::{repair_coordinate, repair_csv, RepairOutput, DEFAULT_INTEGER_DIGITS};

/// Latitude/longitude rectangle treated as valid for the target territory.
///
/// Defaults to the box around Romania used by the published data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Default southern edge of the accepted area.
pub const DEFAULT_MIN_LATITUDE: f64 = 40.0;
/// Default northern edge of the accepted area.
pub const DEFAULT_MAX_LATITUDE: f64 = 50.0;
/// Default western edge of the accepted area.
pub const DEFAULT_MIN_LONGITUDE: f64 = 19.0;
/// Default eastern edge of the accepted area.
pub const DEFAULT_MAX_LONGITUDE: f64 = 30.0;

impl BoundingBox {
    /// Create a bounding box from its edges.
    pub fn new(min_latitude: f64, max_latitude: f64, min_longitude: f64, max_longitude: f64) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Returns true if the point lies inside the box (edges included).
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_LATITUDE,
            DEFAULT_MAX_LATITUDE,
            DEFAULT_MIN_LONGITUDE,
            DEFAULT_MAX_LONGITUDE,
        )
    }
}

/// One educational institution with its location.
///
/// Built once per accepted CSV row and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    /// County (e.g., "Cluj").
    pub county: String,
    /// Institution name, used for display and search.
    pub name: String,
    /// Institution type (e.g., "Liceu"), used for icon coloring and filtering.
    pub kind: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl LocationRecord {
    /// Create a new record.
    pub fn new(county: &str, name: &str, kind: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            county: county.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            latitude,
            longitude,
        }
    }
}
