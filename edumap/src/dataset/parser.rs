//! Strict parser for the institution CSV.
//!
//! The CSV is a header row followed by one institution per row. We resolve the
//! five required columns through a [`ColumnMapping`], then accept a row only if
//! its county and name are present and its coordinates parse as finite
//! decimals inside the configured [`BoundingBox`].
//!
//! Rejected rows are counted in the [`ParseReport`] and never repaired here.
//! Malformed coordinates can be fixed beforehand with [`super::repair_csv`].

use std::fmt;

use csv::StringRecord;

use super::{BoundingBox, LocationRecord};

/// Error type for CSV parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document has no data rows (empty text or header only).
    #[error("CSV source has no data rows")]
    EmptySource,

    /// A required field has no matching header.
    #[error("CSV header has no column for {field} (accepted names: {candidates})")]
    MissingColumn { field: Field, candidates: String },

    /// Every data row was rejected.
    #[error("None of the {rejected} CSV rows has a valid location")]
    NoValidRecords { rejected: usize },

    /// The CSV reader failed before any row could be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A logical column of the institution CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    County,
    Name,
    Kind,
    Latitude,
    Longitude,
}

impl Field {
    /// All fields, in the order they appear in [`LocationRecord`].
    pub fn all() -> &'static [Field] {
        &[
            Field::County,
            Field::Name,
            Field::Kind,
            Field::Latitude,
            Field::Longitude,
        ]
    }

    /// Field name as used in configuration (`[columns]` section).
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::County => "county",
            Field::Name => "name",
            Field::Kind => "type",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from each [`Field`] to the header names accepted for it.
///
/// Header matching ignores case, surrounding whitespace and a leading UTF-8 BOM.
/// The first header matching any alias wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    county: Vec<String>,
    name: Vec<String>,
    kind: Vec<String>,
    latitude: Vec<String>,
    longitude: Vec<String>,
}

impl ColumnMapping {
    /// Header names accepted for a field.
    pub fn aliases(&self, field: Field) -> &[String] {
        match field {
            Field::County => &self.county,
            Field::Name => &self.name,
            Field::Kind => &self.kind,
            Field::Latitude => &self.latitude,
            Field::Longitude => &self.longitude,
        }
    }

    /// Replace the header names accepted for a field.
    pub fn set_aliases(&mut self, field: Field, aliases: Vec<String>) {
        let slot = match field {
            Field::County => &mut self.county,
            Field::Name => &mut self.name,
            Field::Kind => &mut self.kind,
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
        };
        *slot = aliases;
    }

    /// Builder-style variant of [`set_aliases`](Self::set_aliases).
    pub fn with_aliases(mut self, field: Field, aliases: &[&str]) -> Self {
        self.set_aliases(field, aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Resolve every field to a column position in the header row.
    pub(super) fn resolve(&self, headers: &StringRecord) -> Result<ResolvedColumns, ParseError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let find = |field: Field| -> Result<usize, ParseError> {
            let aliases = self.aliases(field);
            aliases
                .iter()
                .map(|alias| normalize_header(alias))
                .find_map(|alias| normalized.iter().position(|h| *h == alias))
                .ok_or_else(|| ParseError::MissingColumn {
                    field,
                    candidates: aliases.join(", "),
                })
        };

        Ok(ResolvedColumns {
            county: find(Field::County)?,
            name: find(Field::Name)?,
            kind: find(Field::Kind)?,
            latitude: find(Field::Latitude)?,
            longitude: find(Field::Longitude)?,
        })
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        Self {
            county: owned(&["County", "Judet", "Județ"]),
            name: owned(&["Name", "Nume Unități", "Nume Unitati", "Nume"]),
            kind: owned(&["Type", "Tip"]),
            latitude: owned(&["Latitude", "Latitudine", "Lat"]),
            longitude: owned(&["Longitude", "Longitudine", "Lng", "Lon"]),
        }
    }
}

/// Column positions of the required fields in one document.
#[derive(Debug, Clone, Copy)]
pub(super) struct ResolvedColumns {
    pub county: usize,
    pub name: usize,
    pub kind: usize,
    pub latitude: usize,
    pub longitude: usize,
}

/// Why a data row was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// A required cell is empty or absent.
    MissingField(Field),
    /// A coordinate cell is not a finite decimal number.
    InvalidCoordinate { field: Field, value: String },
    /// The coordinates parse but lie outside the bounding box.
    OutOfBounds { latitude: f64, longitude: f64 },
    /// The CSV reader could not decode the row.
    Malformed(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingField(field) => write!(f, "missing {}", field),
            RejectReason::InvalidCoordinate { field, value } => {
                write!(f, "invalid {} '{}'", field, value)
            }
            RejectReason::OutOfBounds {
                latitude,
                longitude,
            } => write!(f, "({}, {}) outside bounding box", latitude, longitude),
            RejectReason::Malformed(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}

/// A rejected data row (1-based index, header excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: RejectReason,
}

/// Aggregate outcome of parsing one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Non-blank data rows seen.
    pub total_rows: usize,
    /// Rows turned into records.
    pub accepted: usize,
    /// Rows dropped, in input order.
    pub rejected: Vec<RejectedRow>,
}

impl ParseReport {
    /// Number of rejected rows.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Accepted records plus the report describing the rest.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    /// Accepted records in input order.
    pub records: Vec<LocationRecord>,
    pub report: ParseReport,
}

/// Parser for the institution CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    mapping: ColumnMapping,
    bounds: BoundingBox,
}

impl CsvParser {
    /// Create a parser with the given header mapping and bounding box.
    pub fn new(mapping: ColumnMapping, bounds: BoundingBox) -> Self {
        Self { mapping, bounds }
    }

    /// The header mapping used by this parser.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Parse a whole CSV document.
    ///
    /// Fails with [`ParseError::EmptySource`] when there are no data rows and
    /// with [`ParseError::NoValidRecords`] when every row is rejected.
    pub fn parse(&self, text: &str) -> Result<ParsedDataset, ParseError> {
        let mut reader = csv_reader(text);
        let headers = reader.headers()?.clone();

        let rows: Vec<(usize, Result<StringRecord, csv::Error>)> = reader
            .records()
            .enumerate()
            .map(|(i, row)| (i + 1, row))
            .filter(|(_, row)| !matches!(row, Ok(record) if is_blank(record)))
            .collect();

        if rows.is_empty() {
            return Err(ParseError::EmptySource);
        }

        let columns = self.mapping.resolve(&headers)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut report = ParseReport {
            total_rows: rows.len(),
            ..ParseReport::default()
        };

        for (row, result) in rows {
            let outcome = match result {
                Ok(record) => self.parse_row(&record, &columns),
                Err(e) => Err(RejectReason::Malformed(e.to_string())),
            };
            match outcome {
                Ok(location) => records.push(location),
                Err(reason) => {
                    tracing::trace!(row, reason = %reason, "Rejected CSV row");
                    report.rejected.push(RejectedRow { row, reason });
                }
            }
        }
        report.accepted = records.len();

        tracing::debug!(
            total = report.total_rows,
            accepted = report.accepted,
            rejected = report.rejected_count(),
            "Parsed institution CSV"
        );

        if records.is_empty() {
            return Err(ParseError::NoValidRecords {
                rejected: report.rejected_count(),
            });
        }

        Ok(ParsedDataset { records, report })
    }

    /// Validate one data row.
    fn parse_row(
        &self,
        record: &StringRecord,
        columns: &ResolvedColumns,
    ) -> Result<LocationRecord, RejectReason> {
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        let county = cell(columns.county);
        if county.is_empty() {
            return Err(RejectReason::MissingField(Field::County));
        }
        let name = cell(columns.name);
        if name.is_empty() {
            return Err(RejectReason::MissingField(Field::Name));
        }
        let kind = cell(columns.kind);

        let latitude = parse_coordinate(Field::Latitude, cell(columns.latitude))?;
        let longitude = parse_coordinate(Field::Longitude, cell(columns.longitude))?;

        if !self.bounds.contains(latitude, longitude) {
            return Err(RejectReason::OutOfBounds {
                latitude,
                longitude,
            });
        }

        Ok(LocationRecord::new(county, name, kind, latitude, longitude))
    }
}

/// Parse a trimmed coordinate cell as a finite decimal.
fn parse_coordinate(field: Field, value: &str) -> Result<f64, RejectReason> {
    if value.is_empty() {
        return Err(RejectReason::MissingField(field));
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RejectReason::InvalidCoordinate {
            field,
            value: value.to_string(),
        }),
    }
}

/// Build the CSV reader used for both parsing and repair.
pub(super) fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes())
}

/// True for rows whose every cell is whitespace (e.g. trailing lines).
pub(super) fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}
