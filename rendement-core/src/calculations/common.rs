//! Common utility functions for worksheet calculations.
//!
//! This module provides rounding and the monthly/annual conversions used both
//! by the derivation engine and by the period toggle.

use rust_decimal::Decimal;
use tracing::warn;

use crate::Period;

fn months_in(period: Period) -> Decimal {
    Decimal::from(period.months())
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rendement_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses an amount entered in `period` on an annual basis.
///
/// Returns `None` only on arithmetic overflow.
pub fn to_annual(
    value: Decimal,
    period: Period,
) -> Option<Decimal> {
    value.checked_mul(months_in(period))
}

/// Expresses an amount entered in `period` on a monthly basis.
///
/// Returns `None` only on arithmetic overflow.
pub fn to_monthly(
    value: Decimal,
    period: Period,
) -> Option<Decimal> {
    value.checked_div(months_in(period))
}

/// Rescales a stored raw value when its field switches from `from` to `to`.
///
/// The converted value is rounded to the cent. Values that are zero or
/// negative are left as they are, and so is a value whose conversion would
/// overflow.
///
/// Because each switch rounds, switching back does not always restore the
/// value exactly. A monthly amount with at most two decimals comes back
/// within 0.01 (in practice unchanged). An annual amount can drift by up to
/// 0.06, since the monthly cent rounding is multiplied by 12 on the way back.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rendement_core::Period;
/// use rendement_core::calculations::common::convert_raw_value;
///
/// assert_eq!(convert_raw_value(dec!(850), Period::Monthly, Period::Annual), dec!(10200));
/// assert_eq!(convert_raw_value(dec!(1000), Period::Annual, Period::Monthly), dec!(83.33));
/// assert_eq!(convert_raw_value(dec!(-5), Period::Monthly, Period::Annual), dec!(-5));
/// ```
pub fn convert_raw_value(
    value: Decimal,
    from: Period,
    to: Period,
) -> Decimal {
    if from == to || value <= Decimal::ZERO {
        return value;
    }

    let converted = match to {
        Period::Annual => to_annual(value, from),
        Period::Monthly => to_monthly(value, from),
    };

    match converted {
        Some(v) => round_half_up(v),
        None => {
            warn!(%value, %from, %to, "period conversion overflowed, keeping value");
            value
        }
    }
}
