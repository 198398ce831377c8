//! User configuration stored in `~/.edumap/config.ini`.
//!
//! The file is optional. Missing sections and keys fall back to built-in
//! defaults; invalid values are reported as [`ConfigFileError::InvalidValue`]
//! naming the section and key.
//!
//! # Example
//!
//! ```
//! use edumap::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::default();
//! ConfigKey::RepairEnabled.set(&mut config, "true").unwrap();
//! assert_eq!(config.repair_digits(), Some(2));
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_LOG_FILE_NAME, DEFAULT_SOURCE};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, DataSettings, LoggingSettings, RepairSettings};
