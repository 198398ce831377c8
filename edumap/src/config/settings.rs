//! Settings structs for all configuration sections.
//!
//! Each field of [`ConfigFile`] represents one `[section]` of the INI file.
//! Sections that map one-to-one onto a library type (`[columns]`, `[bounds]`,
//! `[palette]`) hold that type directly.

use std::path::PathBuf;

use crate::dataset::{BoundingBox, ColumnMapping, CsvParser};
use crate::loader::DataSource;
use crate::marker::TypePalette;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Data source settings
    pub data: DataSettings,
    /// Header aliases per field
    pub columns: ColumnMapping,
    /// Accepted coordinate area
    pub bounds: BoundingBox,
    /// Coordinate repair settings
    pub repair: RepairSettings,
    /// Icon colors per institution type
    pub palette: TypePalette,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    /// File path or HTTP(S) URL of the CSV.
    pub source: String,
    /// Timeout in seconds for HTTP downloads.
    pub timeout: u64,
}

/// Coordinate repair configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairSettings {
    /// Run the repair stage before every load.
    pub enabled: bool,
    /// Integer digits kept before the re-inserted decimal point.
    pub integer_digits: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path.
    pub file: PathBuf,
}

impl ConfigFile {
    /// Configured data source.
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data.source)
    }

    /// Parser using the configured column aliases and bounds.
    pub fn csv_parser(&self) -> CsvParser {
        CsvParser::new(self.columns.clone(), self.bounds)
    }

    /// Repair digits when repair is enabled.
    pub fn repair_digits(&self) -> Option<usize> {
        self.repair.enabled.then_some(self.repair.integer_digits)
    }
}
