//! Fuel Record Types
//! Raw CSV rows and their typed form, with the numeric coercion rules the
//! rest of the pipeline relies on.

use serde::Serialize;
use std::collections::HashMap;

/// Column holding the vehicle identifier.
pub const REGISTRATION_COLUMN: &str = "Registration";

/// Columns coerced to floating point; everything else passes through as-is.
pub const NUMERIC_COLUMNS: [&str; 4] = ["Distance", "Litres", "MPG", "Cost"];

/// One CSV data row, keyed by the header row. Cells that were empty in the
/// file are simply absent.
pub type RawRecord = HashMap<String, String>;

/// A fuel record with the four numeric columns coerced to `f64`.
///
/// Coercion never fails: a missing or non-numeric cell becomes `f64::NAN`
/// and the record is kept. Aggregation decides what NaN means (see the
/// metrics calculator).
#[derive(Debug, Clone, Serialize)]
pub struct FuelRecord {
    #[serde(rename = "Registration")]
    pub registration: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Litres")]
    pub litres: f64,
    #[serde(rename = "MPG")]
    pub mpg: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
    /// Unrecognized columns, passed through unchanged.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl FuelRecord {
    /// Build a typed record from a raw CSV row.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let extra = raw
            .iter()
            .filter(|(key, _)| {
                key.as_str() != REGISTRATION_COLUMN
                    && !NUMERIC_COLUMNS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            registration: raw.get(REGISTRATION_COLUMN).cloned().unwrap_or_default(),
            distance: numeric_field(raw, "Distance"),
            litres: numeric_field(raw, "Litres"),
            mpg: numeric_field(raw, "MPG"),
            cost: numeric_field(raw, "Cost"),
            extra,
        }
    }
}

fn numeric_field(raw: &RawRecord, column: &str) -> f64 {
    raw.get(column)
        .map(|value| parse_float_prefix(value))
        .unwrap_or(f64::NAN)
}

/// Parse the longest leading float prefix of a string: optional sign,
/// digits with an optional decimal point, optional exponent. `"12.5kg"`
/// yields 12.5; an entirely non-numeric string yields NaN. No thousands
/// separators.
pub fn parse_float_prefix(value: &str) -> f64 {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        seen_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return f64::NAN;
    }

    // Only take an exponent if at least one digit follows it, so "1e" and
    // "2e+" fall back to the mantissa.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exponent_digits = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exponent_digits {
            end = cursor;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_plain_and_prefixed_floats() {
        assert_eq!(parse_float_prefix("412.3"), 412.3);
        assert_eq!(parse_float_prefix("  73.5  "), 73.5);
        assert_eq!(parse_float_prefix("12.5kg"), 12.5);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("-2e3"), -2000.0);
        assert_eq!(parse_float_prefix("-.25"), -0.25);
    }

    #[test]
    fn incomplete_exponent_falls_back_to_mantissa() {
        assert_eq!(parse_float_prefix("1e"), 1.0);
        assert_eq!(parse_float_prefix("2e+"), 2.0);
        assert_eq!(parse_float_prefix("3E4"), 30000.0);
    }

    #[test]
    fn non_numeric_strings_yield_nan() {
        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix("bad").is_nan());
        assert!(parse_float_prefix("-").is_nan());
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("e5").is_nan());
    }

    #[test]
    fn coerces_numeric_columns_and_keeps_the_rest() {
        let record = FuelRecord::from_raw(&raw(&[
            ("Registration", "FL19 XKC"),
            ("Distance", "1284.5"),
            ("Litres", "412.3"),
            ("MPG", "14.2"),
            ("Cost", "585.47"),
            ("Make", "DAF"),
        ]));

        assert_eq!(record.registration, "FL19 XKC");
        assert_eq!(record.distance, 1284.5);
        assert_eq!(record.litres, 412.3);
        assert_eq!(record.mpg, 14.2);
        assert_eq!(record.cost, 585.47);
        assert_eq!(record.extra.get("Make").map(String::as_str), Some("DAF"));
        assert!(!record.extra.contains_key("Litres"));
    }

    #[test]
    fn missing_or_bad_columns_become_nan_not_errors() {
        let record = FuelRecord::from_raw(&raw(&[
            ("Registration", "AB11 CDE"),
            ("Litres", "n/a"),
        ]));

        assert!(record.litres.is_nan());
        assert!(record.distance.is_nan());
        assert!(record.mpg.is_nan());
        assert!(record.cost.is_nan());
        assert_eq!(record.registration, "AB11 CDE");
    }
}
