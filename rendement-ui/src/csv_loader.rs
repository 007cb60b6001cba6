//! CSV loader for batches of worksheet scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Every
//! column is optional; an empty cell or a missing column leaves the field
//! blank, exactly like an empty input box. Number cells are read like typed
//! input: `4,5` and `216 000` are accepted, and text that is not a number
//! leaves the field blank instead of rejecting the file.
//!
//! | Column | Type | Notes |
//! |------------------|---------|---------------------------------------|
//! | `achat` | decimal | Purchase price |
//! | `loyer` | decimal | Rent, in `loyer_period` |
//! | `loyer_period` | string | `mensuel` (default) or `annuel` |
//! | `charges` | decimal | Charges, in `charges_period` |
//! | `charges_period` | string | `mensuel` (default) or `annuel` |
//! | `rendement` | decimal | Yield in percent, e.g. `5` for 5 % |
//!
//! ### Example
//!
//! ```csv
//! achat,loyer,loyer_period,charges,charges_period,rendement
//! 200000,1000,mensuel,2000,annuel,
//! ,1000,mensuel,100,mensuel,5
//! ```
use std::path::Path;

use rendement_core::{FieldState, FieldStates, Period};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::parse_optional_decimal;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    achat: Option<String>,
    loyer: Option<String>,
    loyer_period: Option<String>,
    charges: Option<String>,
    charges_period: Option<String>,
    rendement: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV reading failed (bad structure, column count,
    /// invalid UTF-8).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A period cell held something other than `mensuel` or `annuel`.
    /// `row` is 1-based (header = row 0).
    #[error("unrecognised period '{period}' on row {row}")]
    InvalidPeriod { period: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_amount(cell: Option<String>) -> Option<Decimal> {
    cell.as_deref().and_then(parse_optional_decimal)
}

fn convert_period(
    cell: Option<String>,
    row_number: usize,
) -> Result<Period, CsvLoadError> {
    match cell.as_deref().map(str::trim) {
        None | Some("") => Ok(Period::default()),
        Some(text) => Period::parse(text).ok_or_else(|| CsvLoadError::InvalidPeriod {
            period: text.to_string(),
            row: row_number,
        }),
    }
}

/// Convert a single CSV row into a field snapshot.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<FieldStates, CsvLoadError> {
    Ok(FieldStates {
        achat: FieldState::new(convert_amount(row.achat)),
        loyer: FieldState::with_period(
            convert_amount(row.loyer),
            convert_period(row.loyer_period, row_number)?,
        ),
        charges: FieldState::with_period(
            convert_amount(row.charges),
            convert_period(row.charges_period, row_number)?,
        ),
        rendement: FieldState::new(convert_amount(row.rendement)),
    })
}

/// Parse CSV text and return one [`FieldStates`] per data row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid.
/// * [CsvLoadError::InvalidPeriod] – if a period cell is not recognised.
pub fn load_from_str(input: &str) -> Result<Vec<FieldStates>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<FieldStates>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let scenarios = load_from_str(&contents)?;
    tracing::debug!(path = %path.display(), rows = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const FULL_CSV: &str = "\
achat,loyer,loyer_period,charges,charges_period,rendement
200000,1000,mensuel,2000,annuel,
,1000,mensuel,100,mensuel,5
";

    // -----------------------------------------------------------------------
    // 1. Full CSV – every column present, some cells empty
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_csv_rows_in_order() {
        let scenarios = load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(scenarios.len(), 2);

        let first = &scenarios[0];
        assert_eq!(first.achat.raw_value, Some(dec!(200000)));
        assert_eq!(first.loyer, FieldState::with_period(Some(dec!(1000)), Period::Monthly));
        assert_eq!(first.charges, FieldState::with_period(Some(dec!(2000)), Period::Annual));
        assert_eq!(first.rendement.raw_value, None);

        let second = &scenarios[1];
        assert_eq!(second.achat.raw_value, None);
        assert_eq!(second.rendement.raw_value, Some(dec!(5)));
    }

    // -----------------------------------------------------------------------
    // 2. Missing columns – fields are blank, periods monthly
    // -----------------------------------------------------------------------
    #[test]
    fn test_missing_columns_are_blank() {
        let csv = "achat,rendement\n150000,4.5\n";
        let scenarios = load_from_str(csv).expect("should parse");

        let s = &scenarios[0];
        assert_eq!(s.achat.raw_value, Some(dec!(150000)));
        assert_eq!(s.rendement.raw_value, Some(dec!(4.5)));
        assert_eq!(s.loyer, FieldState::default());
        assert_eq!(s.charges, FieldState::default());
    }

    // -----------------------------------------------------------------------
    // 3. Column order does not matter, English period names accepted
    // -----------------------------------------------------------------------
    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "\
rendement,charges_period,charges,loyer
5,annual,1200,1000
";
        let scenarios = load_from_str(csv).expect("column order should not matter");

        assert_eq!(scenarios[0].charges.period, Period::Annual);
        assert_eq!(scenarios[0].charges.raw_value, Some(dec!(1200)));
        assert_eq!(scenarios[0].loyer.raw_value, Some(dec!(1000)));
    }

    // -----------------------------------------------------------------------
    // 4. Errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_period_reports_row() {
        let csv = "\
loyer,loyer_period
1000,mensuel
1000,hebdo
";
        match load_from_str(csv).unwrap_err() {
            CsvLoadError::InvalidPeriod { period, row } => {
                assert_eq!(period, "hebdo");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_cell_is_blank() {
        let csv = "achat,loyer,charges,rendement\n200000,1000,100,n/a\nbeaucoup,1000,100,5\n";
        let scenarios = load_from_str(csv).expect("a bad number must not reject the file");

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].rendement.raw_value, None);
        assert_eq!(scenarios[0].charges.raw_value, Some(dec!(100)));
        assert_eq!(scenarios[1].achat.raw_value, None);
        assert_eq!(scenarios[1].rendement.raw_value, Some(dec!(5)));
    }

    #[test]
    fn test_french_number_cells_are_accepted() {
        let csv = "achat,rendement\n\"216 000\",\"4,5\"\n";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].achat.raw_value, Some(dec!(216000)));
        assert_eq!(scenarios[0].rendement.raw_value, Some(dec!(4.5)));
    }

    #[test]
    fn test_high_precision_values_are_exact() {
        let csv = "achat,loyer\n123456789012345678.5,850.125\n";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].achat.raw_value, Some(dec!(123456789012345678.5)));
        assert_eq!(scenarios[0].loyer.raw_value, Some(dec!(850.125)));
    }

    #[test]
    fn test_ragged_row_returns_parse_error() {
        let csv = "achat,loyer\n200000,1000,extra\n";

        match load_from_str(csv).unwrap_err() {
            CsvLoadError::Parse(_) => { /* expected */ }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let scenarios = load_from_str("achat,loyer\n").expect("header-only CSV is valid");
        assert!(scenarios.is_empty());
    }

    #[test]
    fn test_whitespace_around_values_is_trimmed() {
        let csv = "achat , loyer , loyer_period\n 200000 , 12000 , annuel \n";
        let scenarios = load_from_str(csv).expect("should tolerate surrounding whitespace");

        assert_eq!(scenarios[0].loyer, FieldState::with_period(Some(dec!(12000)), Period::Annual));
    }
}
