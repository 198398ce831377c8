//! `edumap config`: read and change `~/.edumap/config.ini`.
//!
//! Keys use `section.key` names (`data.source`, `bounds.min_latitude`).
//! Per-type palette colors are listed but edited in the file itself.

use clap::Subcommand;
use edumap::config::{ConfigFile, ConfigKey};

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of one key
    Get {
        /// Key such as data.source or repair.enabled
        key: String,
    },

    /// Validate and store a new value for one key
    Set {
        /// Key such as data.source or repair.enabled
        key: String,

        /// New value
        value: String,
    },

    /// Print every key with its current value
    List {
        /// Only print keys of this section (e.g. bounds)
        #[arg(long)]
        section: Option<String>,
    },

    /// Print the configuration file path, writing defaults if it is missing
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            let key = lookup(&key)?;
            let config = ConfigFile::load()?;
            println!("{}", display_value(&key.get(&config)));
        }
        ConfigCommands::Set { key, value } => {
            let key = lookup(&key)?;
            let mut config = ConfigFile::load()?;
            apply(&mut config, key, &value)?;
            config.save()?;
            println!("{} = {}", key.name(), key.get(&config));
        }
        ConfigCommands::List { section } => {
            let config = ConfigFile::load()?;
            for line in listing(&config, section.as_deref()) {
                println!("{}", line);
            }
        }
        ConfigCommands::Path => println!("{}", ConfigFile::ensure_exists()?.display()),
    }
    Ok(())
}

fn lookup(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        CliError::Config(format!(
            "no such key '{}' (run 'edumap config list' for the key names)",
            name
        ))
    })
}

/// Set a key and re-check constraints that span keys (bounds ordering).
fn apply(config: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<(), CliError> {
    key.set(config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.validate()?;
    Ok(())
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(empty)"
    } else {
        value
    }
}

/// `section.key = value` lines, palette entries last.
fn listing(config: &ConfigFile, section: Option<&str>) -> Vec<String> {
    let wanted = |s: &str| section.map_or(true, |only| only.eq_ignore_ascii_case(s));

    let mut lines: Vec<String> = ConfigKey::all()
        .iter()
        .filter(|key| wanted(key.section()))
        .map(|key| format!("{} = {}", key.name(), display_value(&key.get(config))))
        .collect();

    if wanted("palette") {
        lines.extend(
            config
                .palette
                .entries()
                .into_iter()
                .map(|(kind, color)| format!("palette.{} = {}", kind, color)),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key() {
        assert!(matches!(lookup("data.nope"), Err(CliError::Config(_))));
        assert_eq!(lookup("Data.Source").unwrap(), ConfigKey::DataSource);
    }

    #[test]
    fn test_apply_rejects_inverted_bounds() {
        let mut config = ConfigFile::default();
        assert!(apply(&mut config, ConfigKey::BoundsMinLatitude, "55").is_err());
        assert!(apply(&mut config, ConfigKey::BoundsMinLatitude, "43.5").is_ok());
        assert_eq!(config.bounds.min_latitude, 43.5);
    }

    #[test]
    fn test_listing_by_section() {
        let config = ConfigFile::default();

        let bounds = listing(&config, Some("bounds"));
        assert_eq!(bounds.len(), 4);
        assert_eq!(bounds[0], "bounds.min_latitude = 40");

        let palette = listing(&config, Some("palette"));
        assert_eq!(palette[0], "palette.default = #3498db");
        assert!(palette.contains(&"palette.Liceu = #e74c3c".to_string()));

        let all = listing(&config, None);
        assert_eq!(all.len(), ConfigKey::all().len() + config.palette.entries().len());
    }
}
