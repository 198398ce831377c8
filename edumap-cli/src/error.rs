//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use edumap::config::ConfigFileError;
use edumap::dataset::ParseError;
use edumap::export::ExportError;
use edumap::loader::{HttpError, LoadError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create the HTTP client
    HttpClient(HttpError),
    /// Failed to load the dataset
    Load(LoadError),
    /// Failed to repair a CSV document
    Repair(ParseError),
    /// Failed to write the GeoJSON export
    Export(ExportError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Load(LoadError::Io { .. }) => {
                eprintln!();
                eprintln!("Point EduMap at the CSV with one of:");
                eprintln!("  edumap --source <path-or-url> <command>");
                eprintln!("  edumap config set data.source <path-or-url>");
            }
            CliError::Load(LoadError::Parse(ParseError::MissingColumn { field, .. }))
            | CliError::Repair(ParseError::MissingColumn { field, .. }) => {
                eprintln!();
                eprintln!("The header row has no column for '{}'.", field);
                eprintln!("Add the header name used by your file with:");
                eprintln!("  edumap config set columns.{} \"<header>\"", field);
            }
            CliError::Load(LoadError::Parse(ParseError::NoValidRecords { .. })) => {
                eprintln!();
                eprintln!("Every row was rejected. If the coordinates look like 460.623.309,");
                eprintln!("enable coordinate repair:");
                eprintln!("  edumap config set repair.enabled true");
            }
            CliError::Load(LoadError::FetchFailure { .. }) => {
                eprintln!();
                eprintln!("Check the URL and your network connection. The download timeout");
                eprintln!("can be raised with: edumap config set data.timeout <seconds>");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::Load(e) => write!(f, "Failed to load data: {}", e),
            CliError::Repair(e) => write!(f, "Failed to repair CSV: {}", e),
            CliError::Export(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Load(e) => Some(e),
            CliError::Repair(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Load(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}
