use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing.
///
/// Trims, drops grouping spaces (plain, no-break and narrow no-break) and a
/// trailing `€` or `%` unit. A lone comma is the French decimal separator;
/// when a dot is also present commas are thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let stripped: String = s
        .trim()
        .trim_end_matches(['€', '%'])
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect();

    if !stripped.contains('.') && stripped.matches(',').count() == 1 {
        stripped.replace(',', ".")
    } else {
        stripped.replace(',', "")
    }
}

fn parse_normalized(normalized: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(normalized).or_else(|e| {
        if normalized.contains(['e', 'E']) {
            Decimal::from_scientific(normalized)
        } else {
            Err(e)
        }
    })
}

/// Parses a string into a [`Decimal`], failing on empty or malformed input.
///
/// Accepts the same spellings as [`parse_optional_decimal`].
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    parse_normalized(&normalize_decimal_input(s)).map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a field's text into an optional [`Decimal`].
///
/// Returns `None` for empty or whitespace-only input, and also when parsing
/// fails (logs a warning on parse failure). Malformed text is treated exactly
/// like a blank field.
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        None
    } else {
        parse_normalized(&normalized).map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid number, treating field as blank: {}", e);
                None
            },
            Some,
        )
    }
}
