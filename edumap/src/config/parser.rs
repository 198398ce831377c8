//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::dataset::Field;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [data] section
    if let Some(section) = ini.section(Some("data")) {
        if let Some(v) = section.get("source") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.source = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout") {
            config.data.timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    invalid("data", "timeout", v, "must be a positive integer (seconds)")
                })?;
        }
    }

    // [columns] section
    if let Some(section) = ini.section(Some("columns")) {
        for field in Field::all() {
            if let Some(v) = section.get(field.as_str()) {
                let aliases = parse_alias_list(v);
                if aliases.is_empty() {
                    return Err(invalid(
                        "columns",
                        field.as_str(),
                        v,
                        "must list at least one header name",
                    ));
                }
                config.columns.set_aliases(*field, aliases);
            }
        }
    }

    // [bounds] section
    if let Some(section) = ini.section(Some("bounds")) {
        let bounds = &mut config.bounds;
        for (key, slot) in [
            ("min_latitude", &mut bounds.min_latitude),
            ("max_latitude", &mut bounds.max_latitude),
            ("min_longitude", &mut bounds.min_longitude),
            ("max_longitude", &mut bounds.max_longitude),
        ] {
            if let Some(v) = section.get(key) {
                *slot = parse_degrees(v)
                    .ok_or_else(|| invalid("bounds", key, v, "must be a number of degrees"))?;
            }
        }
    }

    // [repair] section
    if let Some(section) = ini.section(Some("repair")) {
        if let Some(v) = section.get("enabled") {
            config.repair.enabled = parse_bool(v);
        }
        if let Some(v) = section.get("integer_digits") {
            config.repair.integer_digits = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    invalid("repair", "integer_digits", v, "must be a positive integer")
                })?;
        }
    }

    // [palette] section: `default` plus one entry per type
    if let Some(section) = ini.section(Some("palette")) {
        for (key, v) in section.iter() {
            let color = normalize_color(v)
                .ok_or_else(|| invalid("palette", key, v, "must be a hex color like #3498db"))?;
            if key == "default" {
                config.palette.set_default_color(&color);
            } else {
                config.palette.set_color(key.trim(), &color);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    config.validate()?;
    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Split a comma-separated header list, dropping empty entries.
pub(super) fn parse_alias_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a finite coordinate in decimal degrees.
pub(super) fn parse_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize a hex color to `#rrggbb` or `#rgb` form.
///
/// Surrounding quotes and the leading `#` are optional in the file.
pub(super) fn normalize_color(value: &str) -> Option<String> {
    let v = value.trim().trim_matches('"').trim();
    let hex = v.strip_prefix('#').unwrap_or(v);
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    valid.then(|| format!("#{}", hex.to_ascii_lowercase()))
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::loader::DataSource;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_data_section() {
        let config = load(
            r#"
[data]
source = https://example.com/locatii.csv
timeout = 5
"#,
        )
        .unwrap();

        assert_eq!(
            config.data_source(),
            DataSource::Url("https://example.com/locatii.csv".to_string())
        );
        assert_eq!(config.data.timeout, 5);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load("[data]\ntimeout = soon\n").unwrap_err();
        assert!(err.to_string().contains("data.timeout"));
    }

    #[test]
    fn test_column_aliases() {
        let config = load(
            r#"
[columns]
county = Judet , Județ
latitude = Lat
"#,
        )
        .unwrap();

        assert_eq!(config.columns.aliases(Field::County), ["Judet", "Județ"]);
        assert_eq!(config.columns.aliases(Field::Latitude), ["Lat"]);
        // Untouched fields keep their defaults
        assert!(config
            .columns
            .aliases(Field::Longitude)
            .contains(&"Longitude".to_string()));
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let err = load("[columns]\nname = , ,\n").unwrap_err();
        assert!(err.to_string().contains("columns.name"));
    }

    #[test]
    fn test_bounds_section() {
        let config = load(
            r#"
[bounds]
min_latitude = 43.5
max_latitude = 48.3
"#,
        )
        .unwrap();

        assert_eq!(config.bounds.min_latitude, 43.5);
        assert_eq!(config.bounds.max_latitude, 48.3);
        assert_eq!(config.bounds.min_longitude, 19.0);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = load("[bounds]\nmin_latitude = 50\nmax_latitude = 40\n").unwrap_err();
        assert!(err.to_string().contains("min_latitude"));
    }

    #[test]
    fn test_repair_section() {
        let config = load("[repair]\nenabled = yes\ninteger_digits = 3\n").unwrap();
        assert_eq!(config.repair_digits(), Some(3));

        let err = load("[repair]\ninteger_digits = 0\n").unwrap_err();
        assert!(err.to_string().contains("integer_digits"));
    }

    #[test]
    fn test_palette_section() {
        let config = load(
            r##"
[palette]
default = "#111111"
Liceu = "#000000"
Universitate = abcdef
"##,
        )
        .unwrap();

        assert_eq!(config.palette.default_color(), "#111111");
        assert_eq!(config.palette.color_for("Liceu"), "#000000");
        assert_eq!(config.palette.color_for("Universitate"), "#abcdef");
        assert_eq!(config.palette.color_for("Grădiniță"), "#f39c12");
        assert_eq!(config.palette.color_for("Altceva"), "#111111");
    }

    #[test]
    fn test_invalid_color() {
        let err = load("[palette]\nLiceu = red\n").unwrap_err();
        assert!(err.to_string().contains("hex color"));
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("#E74C3C").as_deref(), Some("#e74c3c"));
        assert_eq!(normalize_color("\"#fff\"").as_deref(), Some("#fff"));
        assert_eq!(normalize_color("e74c3c").as_deref(), Some("#e74c3c"));
        assert_eq!(normalize_color("#12345"), None);
        assert_eq!(normalize_color(""), None);
    }

    #[test]
    fn test_parse_alias_list() {
        assert_eq!(parse_alias_list("A, B ,,C"), vec!["A", "B", "C"]);
        assert!(parse_alias_list(" , ").is_empty());
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = load("[logging]\nfile = /tmp/edumap-test.log\n").unwrap();
        assert_eq!(config.logging.file, PathBuf::from("/tmp/edumap-test.log"));
        assert_eq!(config.data.source, DEFAULT_SOURCE);
        assert_eq!(config.data.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert!(!config.repair.enabled);
    }
}
