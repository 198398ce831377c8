//! Default values for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::dataset::{BoundingBox, ColumnMapping, DEFAULT_INTEGER_DIGITS};
use crate::loader::DEFAULT_TIMEOUT_SECS;
use crate::marker::TypePalette;

/// Default CSV location, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "data/locatii.csv";

/// Default timeout in seconds for HTTP downloads.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "edumap.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            data: DataSettings {
                source: DEFAULT_SOURCE.to_string(),
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            columns: ColumnMapping::default(),
            bounds: BoundingBox::default(),
            repair: RepairSettings {
                enabled: false,
                integer_digits: DEFAULT_INTEGER_DIGITS,
            },
            palette: TypePalette::default(),
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
