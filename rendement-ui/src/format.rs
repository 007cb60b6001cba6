//! French-locale rendering of worksheet values.
//!
//! Everything here is a pure function over plain numbers so the engine's
//! output stays testable without any text involved.
//!
//! | Kind | Rounding | Fraction digits | Example |
//! |------|----------|-----------------|---------|
//! | Currency | nearest cent | 0 to 2 | `1 234,5 €` |
//! | Percent | nearest hundredth | 1 to 2 | `5,0 %` |
//!
//! Digits are grouped by three with a narrow no-break space (U+202F) and the
//! euro sign is preceded by a no-break space (U+00A0).

use rendement_core::Equivalence;
use rendement_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Token shown in place of a value that cannot be computed.
pub const DEFAULT_PLACEHOLDER: &str = "--";

const GROUP_SEPARATOR: char = '\u{202f}';
const DECIMAL_SEPARATOR: char = ',';

/// How a worksheet value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Currency,
    Percent,
}

/// Inserts a group separator every three digits of an unsigned integer string.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Renders a value already rounded to two places, keeping at least
/// `min_fraction_digits` digits after the separator.
fn format_localized(
    value: Decimal,
    min_fraction_digits: usize,
) -> String {
    // normalize() drops trailing zeros and turns -0 into 0
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut out = format!("{sign}{}", group_digits(int_part));
    if frac_part.len().max(min_fraction_digits) > 0 {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
        for _ in frac_part.len()..min_fraction_digits {
            out.push('0');
        }
    }
    out
}

/// Formats an amount in euros, rounded to the cent, with 0 to 2 fraction digits.
pub fn format_euro(value: Decimal) -> String {
    format!("{}\u{a0}€", format_localized(round_half_up(value), 0))
}

/// Formats a percentage rounded to the hundredth, with 1 to 2 fraction digits.
pub fn format_percent(value: Decimal) -> String {
    format!("{} %", format_localized(round_half_up(value), 1))
}

/// Formats a restated amount, e.g. `soit 12 000 €/an`.
pub fn format_equivalence(eq: &Equivalence) -> String {
    format!("soit {}{}", format_euro(eq.amount), eq.per.suffix())
}

/// Formats an optional value, using `placeholder` when it is unavailable.
pub fn format_value(
    value: Option<Decimal>,
    kind: ValueKind,
    placeholder: &str,
) -> String {
    match (value, kind) {
        (Some(v), ValueKind::Currency) => format_euro(v),
        (Some(v), ValueKind::Percent) => format_percent(v),
        (None, _) => placeholder.to_string(),
    }
}

/// Formats an optional equivalence; a missing one renders as an empty string.
pub fn format_optional_equivalence(eq: Option<&Equivalence>) -> String {
    eq.map(format_equivalence).unwrap_or_default()
}
