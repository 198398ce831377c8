//! Configuration file handling for ~/.edumap/config.ini.
//!
//! Settings structs live in [`super::settings`], defaults in
//! [`super::defaults`], parsing in [`super::parser`] and serialization in
//! [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;

/// Errors raised while reading, writing or validating `config.ini`.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value is malformed or conflicts with another key.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load `~/.edumap/config.ini`, or defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        super::parser::parse_ini(&ini)
    }

    /// Write `~/.edumap/config.ini`.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Write the commented INI form to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_error = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, super::writer::to_config_string(self)).map_err(write_error)?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Write a default config file unless one exists, and return its path.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Check constraints that span more than one key.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        let b = &self.bounds;
        for (min_key, min, max_key, max) in [
            ("min_latitude", b.min_latitude, "max_latitude", b.max_latitude),
            ("min_longitude", b.min_longitude, "max_longitude", b.max_longitude),
        ] {
            if min > max {
                return Err(ConfigFileError::InvalidValue {
                    section: "bounds".to_string(),
                    key: min_key.to_string(),
                    value: min.to_string(),
                    reason: format!("must not exceed bounds.{} ({})", max_key, max),
                });
            }
        }
        Ok(())
    }
}

/// `~/.edumap`, or `./.edumap` when there is no home directory.
pub fn config_directory() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".edumap"),
        None => PathBuf::from(".edumap"),
    }
}

/// `~/.edumap/config.ini`
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

const CONFIG_FILE_NAME: &str = "config.ini";
