//! Coordinate repair for malformed CSV exports.
//!
//! Some revisions of the published CSV lost the decimal separator of the
//! coordinates and gained thousands separators instead, e.g. `460.623.309`
//! for `46.0623309`. This stage rebuilds such values by keeping every digit
//! and re-inserting the decimal point after a fixed number of integer digits.
//!
//! Repair is a separate preprocessing step. The parser never applies it; the
//! loader runs it only when `repair.enabled` is set, and the CLI exposes it as
//! the `repair` command.

use super::parser::{csv_reader, is_blank, ColumnMapping, ParseError};

/// Integer digits of every coordinate inside the default bounding box.
pub const DEFAULT_INTEGER_DIGITS: usize = 2;

/// Result of repairing a whole CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutput {
    /// Rewritten CSV document.
    pub text: String,
    /// Coordinate cells that were rewritten.
    pub repaired: usize,
    /// Non-empty coordinate cells that could not be repaired.
    pub unrepairable: usize,
}

/// Repair a single coordinate value.
///
/// Values that already parse with at most `integer_digits` integer digits are
/// returned trimmed and unchanged. Anything else keeps its digits (and sign)
/// and gets a decimal point after the first `integer_digits` digits.
///
/// Returns `None` when there are not enough digits to rebuild a value.
///
/// ```
/// use edumap::dataset::repair_coordinate;
///
/// assert_eq!(repair_coordinate("460.623.309", 2).as_deref(), Some("46.0623309"));
/// assert_eq!(repair_coordinate("46.55", 2).as_deref(), Some("46.55"));
/// assert_eq!(repair_coordinate("n/a", 2), None);
/// ```
pub fn repair_coordinate(raw: &str, integer_digits: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || integer_digits == 0 {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() && integer_part_digits(trimmed) <= integer_digits {
            return Some(trimmed.to_string());
        }
    }

    let negative = trimmed.starts_with('-');
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= integer_digits {
        return None;
    }

    let (integer, fraction) = digits.split_at(integer_digits);
    let sign = if negative { "-" } else { "" };
    Some(format!("{}{}.{}", sign, integer, fraction))
}

/// Rewrite the latitude and longitude columns of a CSV document.
///
/// Other columns pass through untouched. Blank rows are dropped.
pub fn repair_csv(
    text: &str,
    mapping: &ColumnMapping,
    integer_digits: usize,
) -> Result<RepairOutput, ParseError> {
    let mut reader = csv_reader(text);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::EmptySource);
    }
    let columns = mapping.resolve(&headers)?;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;

    let mut repaired = 0;
    let mut unrepairable = 0;

    for row in reader.records() {
        let row = row?;
        if is_blank(&row) {
            continue;
        }

        let mut cells: Vec<String> = row.iter().map(str::to_string).collect();
        for idx in [columns.latitude, columns.longitude] {
            let Some(cell) = cells.get_mut(idx) else {
                continue;
            };
            match repair_coordinate(cell, integer_digits) {
                Some(fixed) if fixed != cell.trim() => {
                    *cell = fixed;
                    repaired += 1;
                }
                Some(_) => {}
                None if !cell.trim().is_empty() => unrepairable += 1,
                None => {}
            }
        }
        writer.write_record(&cells)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    tracing::info!(repaired, unrepairable, "Repaired CSV coordinates");

    Ok(RepairOutput {
        text: String::from_utf8_lossy(&bytes).into_owned(),
        repaired,
        unrepairable,
    })
}

/// Count digits before the decimal point, ignoring a leading sign.
fn integer_part_digits(value: &str) -> usize {
    value
        .trim_start_matches(|c| c == '-' || c == '+')
        .split('.')
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .count()
}
