//! Configuration key access and validation.
//!
//! Type-safe get/set of configuration values by key name, with validation
//! through value specifications. Per-type palette colors are free-form keys
//! and are edited in the file directly.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::parser::{expand_tilde, normalize_color, parse_alias_list, parse_bool, parse_degrees};
use super::settings::ConfigFile;
use crate::dataset::Field;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DataSource,
    DataTimeout,

    ColumnsCounty,
    ColumnsName,
    ColumnsType,
    ColumnsLatitude,
    ColumnsLongitude,

    BoundsMinLatitude,
    BoundsMaxLatitude,
    BoundsMinLongitude,
    BoundsMaxLongitude,

    RepairEnabled,
    RepairIntegerDigits,

    LoggingFile,

    PaletteDefault,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "data.source").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::DataSource => "data.source",
            ConfigKey::DataTimeout => "data.timeout",
            ConfigKey::ColumnsCounty => "columns.county",
            ConfigKey::ColumnsName => "columns.name",
            ConfigKey::ColumnsType => "columns.type",
            ConfigKey::ColumnsLatitude => "columns.latitude",
            ConfigKey::ColumnsLongitude => "columns.longitude",
            ConfigKey::BoundsMinLatitude => "bounds.min_latitude",
            ConfigKey::BoundsMaxLatitude => "bounds.max_latitude",
            ConfigKey::BoundsMinLongitude => "bounds.min_longitude",
            ConfigKey::BoundsMaxLongitude => "bounds.max_longitude",
            ConfigKey::RepairEnabled => "repair.enabled",
            ConfigKey::RepairIntegerDigits => "repair.integer_digits",
            ConfigKey::PaletteDefault => "palette.default",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "data").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "source").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        let aliases = |field: Field| config.columns.aliases(field).join(", ");

        match self {
            ConfigKey::DataSource => config.data.source.clone(),
            ConfigKey::DataTimeout => config.data.timeout.to_string(),
            ConfigKey::ColumnsCounty => aliases(Field::County),
            ConfigKey::ColumnsName => aliases(Field::Name),
            ConfigKey::ColumnsType => aliases(Field::Kind),
            ConfigKey::ColumnsLatitude => aliases(Field::Latitude),
            ConfigKey::ColumnsLongitude => aliases(Field::Longitude),
            ConfigKey::BoundsMinLatitude => config.bounds.min_latitude.to_string(),
            ConfigKey::BoundsMaxLatitude => config.bounds.max_latitude.to_string(),
            ConfigKey::BoundsMinLongitude => config.bounds.min_longitude.to_string(),
            ConfigKey::BoundsMaxLongitude => config.bounds.max_longitude.to_string(),
            ConfigKey::RepairEnabled => config.repair.enabled.to_string(),
            ConfigKey::RepairIntegerDigits => config.repair.integer_digits.to_string(),
            ConfigKey::PaletteDefault => config.palette.default_color().to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before
    /// setting; the config is left unchanged on error.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();
        let columns = &mut config.columns;

        match self {
            ConfigKey::DataSource => config.data.source = value.to_string(),
            ConfigKey::DataTimeout => config.data.timeout = self.parsed(value)?,
            ConfigKey::ColumnsCounty => columns.set_aliases(Field::County, parse_alias_list(value)),
            ConfigKey::ColumnsName => columns.set_aliases(Field::Name, parse_alias_list(value)),
            ConfigKey::ColumnsType => columns.set_aliases(Field::Kind, parse_alias_list(value)),
            ConfigKey::ColumnsLatitude => {
                columns.set_aliases(Field::Latitude, parse_alias_list(value))
            }
            ConfigKey::ColumnsLongitude => {
                columns.set_aliases(Field::Longitude, parse_alias_list(value))
            }
            ConfigKey::BoundsMinLatitude => config.bounds.min_latitude = self.degrees(value)?,
            ConfigKey::BoundsMaxLatitude => config.bounds.max_latitude = self.degrees(value)?,
            ConfigKey::BoundsMinLongitude => config.bounds.min_longitude = self.degrees(value)?,
            ConfigKey::BoundsMaxLongitude => config.bounds.max_longitude = self.degrees(value)?,
            ConfigKey::RepairEnabled => config.repair.enabled = parse_bool(value),
            ConfigKey::RepairIntegerDigits => config.repair.integer_digits = self.parsed(value)?,
            ConfigKey::PaletteDefault => {
                let color = normalize_color(value).ok_or_else(|| self.failed(COLOR_REASON))?;
                config.palette.set_default_color(&color);
            }
            ConfigKey::LoggingFile => config.logging.file = expand_tilde(value),
        }
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| self.failed(&reason))
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::DataSource => Box::new(NonEmptySpec("must be a file path or URL")),
            ConfigKey::DataTimeout => Box::new(PositiveIntegerSpec),
            ConfigKey::ColumnsCounty
            | ConfigKey::ColumnsName
            | ConfigKey::ColumnsType
            | ConfigKey::ColumnsLatitude
            | ConfigKey::ColumnsLongitude => Box::new(AliasListSpec),
            ConfigKey::BoundsMinLatitude
            | ConfigKey::BoundsMaxLatitude
            | ConfigKey::BoundsMinLongitude
            | ConfigKey::BoundsMaxLongitude => Box::new(DegreesSpec),
            ConfigKey::RepairEnabled => Box::new(BooleanSpec),
            ConfigKey::RepairIntegerDigits => Box::new(PositiveIntegerSpec),
            ConfigKey::PaletteDefault => Box::new(ColorSpec),
            ConfigKey::LoggingFile => Box::new(NonEmptySpec("must be a valid path")),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::DataSource,
            ConfigKey::DataTimeout,
            ConfigKey::ColumnsCounty,
            ConfigKey::ColumnsName,
            ConfigKey::ColumnsType,
            ConfigKey::ColumnsLatitude,
            ConfigKey::ColumnsLongitude,
            ConfigKey::BoundsMinLatitude,
            ConfigKey::BoundsMaxLatitude,
            ConfigKey::BoundsMinLongitude,
            ConfigKey::BoundsMaxLongitude,
            ConfigKey::RepairEnabled,
            ConfigKey::RepairIntegerDigits,
            ConfigKey::LoggingFile,
            ConfigKey::PaletteDefault,
        ]
    }

    fn failed(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        }
    }

    fn parsed<T: FromStr>(&self, value: &str) -> Result<T, ConfigKeyError> {
        value
            .parse()
            .map_err(|_| self.failed("must be a positive integer"))
    }

    fn degrees(&self, value: &str) -> Result<f64, ConfigKeyError> {
        parse_degrees(value).ok_or_else(|| self.failed(DEGREES_REASON))
    }
}

const COLOR_REASON: &str = "must be a hex color like #3498db";
const DEGREES_REASON: &str = "must be a number of degrees";

// ============================================================================
// Value Specifications
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Any non-empty value.
struct NonEmptySpec(&'static str);

impl ValueSpecification for NonEmptySpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err(self.0.to_string())
        } else {
            Ok(())
        }
    }
}

struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

struct DegreesSpec;

impl ValueSpecification for DegreesSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_degrees(value)
            .map(|_| ())
            .ok_or_else(|| DEGREES_REASON.to_string())
    }
}

struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        let valid = ["true", "false", "yes", "no", "1", "0", "on", "off"];
        if valid.contains(&lower.as_str()) {
            Ok(())
        } else {
            Err("must be true/false, yes/no, 1/0, or on/off".to_string())
        }
    }
}

/// Comma-separated list with at least one header name.
struct AliasListSpec;

impl ValueSpecification for AliasListSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if parse_alias_list(value).is_empty() {
            Err("must list at least one header name".to_string())
        } else {
            Ok(())
        }
    }
}

struct ColorSpec;

impl ValueSpecification for ColorSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        normalize_color(value)
            .map(|_| ())
            .ok_or_else(|| COLOR_REASON.to_string())
    }
}

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "data.source".parse::<ConfigKey>().unwrap(),
            ConfigKey::DataSource
        );
        assert_eq!(
            "COLUMNS.LATITUDE".parse::<ConfigKey>().unwrap(),
            ConfigKey::ColumnsLatitude
        );
        assert!("palette.Liceu".parse::<ConfigKey>().is_err());
        assert!("invalid.key".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::RepairIntegerDigits.section(), "repair");
        assert_eq!(ConfigKey::RepairIntegerDigits.key_name(), "integer_digits");
        assert_eq!(ConfigKey::ColumnsType.key_name(), "type");
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::DataSource.get(&config), "data/locatii.csv");
        assert_eq!(ConfigKey::DataTimeout.get(&config), "30");
        assert_eq!(ConfigKey::ColumnsType.get(&config), "Type, Tip");
        assert_eq!(ConfigKey::BoundsMinLatitude.get(&config), "40");
        assert_eq!(ConfigKey::RepairEnabled.get(&config), "false");
        assert_eq!(ConfigKey::PaletteDefault.get(&config), "#3498db");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::DataSource
            .set(&mut config, "https://example.com/locatii.csv")
            .unwrap();
        assert!(config.data_source().is_remote());

        ConfigKey::ColumnsCounty.set(&mut config, "Judet,County").unwrap();
        assert_eq!(config.columns.aliases(Field::County), ["Judet", "County"]);

        ConfigKey::BoundsMaxLongitude.set(&mut config, "29.7").unwrap();
        assert_eq!(config.bounds.max_longitude, 29.7);

        ConfigKey::RepairEnabled.set(&mut config, "on").unwrap();
        assert!(config.repair.enabled);

        ConfigKey::PaletteDefault.set(&mut config, "#ABCDEF").unwrap();
        assert_eq!(config.palette.default_color(), "#abcdef");
    }

    #[test]
    fn test_validate_boolean() {
        for valid in &["true", "false", "yes", "no", "1", "0", "on", "off"] {
            assert!(
                ConfigKey::RepairEnabled.validate(valid).is_ok(),
                "Expected '{}' to be valid",
                valid
            );
        }
        assert!(ConfigKey::RepairEnabled.validate("maybe").is_err());
    }

    #[test]
    fn test_validate_positive_integer() {
        assert!(ConfigKey::DataTimeout.validate("30").is_ok());
        assert!(ConfigKey::DataTimeout.validate("0").is_err());
        assert!(ConfigKey::DataTimeout.validate("-1").is_err());
        assert!(ConfigKey::RepairIntegerDigits.validate("abc").is_err());
    }

    #[test]
    fn test_validate_degrees() {
        assert!(ConfigKey::BoundsMinLatitude.validate("43.5").is_ok());
        assert!(ConfigKey::BoundsMinLatitude.validate("-12").is_ok());
        assert!(ConfigKey::BoundsMinLatitude.validate("NaN").is_err());
        assert!(ConfigKey::BoundsMinLatitude.validate("north").is_err());
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::ColumnsName.set(&mut config, " , ").is_err());
        assert!(ConfigKey::PaletteDefault.set(&mut config, "blue").is_err());
        assert!(ConfigKey::DataSource.set(&mut config, "  ").is_err());

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_all_keys_round_trip_names() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }
}
