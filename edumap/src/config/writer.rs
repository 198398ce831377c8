//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;
use crate::dataset::Field;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let columns = |field: Field| config.columns.aliases(field).join(", ");
    let bounds = &config.bounds;

    let mut out = format!(
        r#"[data]
; CSV source: a file path or an http(s):// URL (default: data/locatii.csv)
source = {}
; Timeout in seconds for HTTP downloads (default: 30)
timeout = {}

[columns]
; Header names accepted for each field, comma-separated.
; The first header present in the file wins; matching ignores case.
county = {}
name = {}
type = {}
latitude = {}
longitude = {}

[bounds]
; Rows with coordinates outside this box are rejected (default: Romania)
min_latitude = {}
max_latitude = {}
min_longitude = {}
max_longitude = {}

[repair]
; Rebuild coordinates that lost their decimal point (e.g. 460.623.309)
; before parsing (default: false)
enabled = {}
; Integer digits kept before the re-inserted decimal point (default: 2)
integer_digits = {}

[logging]
; Log file, truncated at the start of every run
file = {}

[palette]
; Icon color for types without an entry
default = "{}"
; One entry per institution type: <type> = "<color>"
"#,
        config.data.source,
        config.data.timeout,
        columns(Field::County),
        columns(Field::Name),
        columns(Field::Kind),
        columns(Field::Latitude),
        columns(Field::Longitude),
        bounds.min_latitude,
        bounds.max_latitude,
        bounds.min_longitude,
        bounds.max_longitude,
        config.repair.enabled,
        config.repair.integer_digits,
        path_to_string(&config.logging.file),
        config.palette.default_color(),
    );

    for (kind, color) in config.palette.entries() {
        out.push_str(&format!("{} = \"{}\"\n", kind, color));
    }

    out
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
