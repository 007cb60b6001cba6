//! Cross-derivation of the four rental yield parameters.
//!
//! Each parameter is recomputed from the three *other* raw inputs. The four
//! formulas read only the user's inputs, never another formula's output, so
//! a rounding difference in one derived value can never leak into another.
//!
//! | Output | Formula |
//! |--------|---------|
//! | Purchase price | (annual rent - annual charges) / yield |
//! | Monthly rent | (yield × purchase price + annual charges) / 12 |
//! | Monthly charges | (annual rent - yield × purchase price) / 12 |
//! | Yield | (annual rent - annual charges) / purchase price × 100 |
//!
//! Yield enters the formulas as a fraction (5 % is 0.05). Rent and charges
//! enter on an annual basis whatever period they were typed in.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rendement_core::{FieldState, FieldStates, Period, derive};
//!
//! let fields = FieldStates {
//!     achat: FieldState::new(None),
//!     loyer: FieldState::with_period(Some(dec!(1000)), Period::Monthly),
//!     charges: FieldState::with_period(Some(dec!(100)), Period::Monthly),
//!     rendement: FieldState::new(Some(dec!(5))),
//! };
//!
//! let result = derive(&fields);
//!
//! assert_eq!(result.achat, Some(dec!(216000)));
//! assert_eq!(result.rendement_percent, None); // purchase price is blank
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::{to_annual, to_monthly};
use crate::{DerivationResult, Equivalence, FieldState, FieldStates, Period};

/// Inputs after conversion to a common annual basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct AnnualInputs {
    achat: Option<Decimal>,
    loyer_annual: Option<Decimal>,
    charges_annual: Option<Decimal>,
    rendement_fraction: Option<Decimal>,
}

/// Stateless calculator for the rental yield worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivationEngine;

impl DerivationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recomputes every derived value from a snapshot of the four fields.
    ///
    /// Never fails: a value that cannot be computed is `None`.
    pub fn calculate(
        &self,
        fields: &FieldStates,
    ) -> DerivationResult {
        let inputs = self.annualize(fields);

        let achat = self.derive_achat(&inputs);
        let loyer_annual = self.derive_loyer_annual(&inputs);
        let charges_annual = self.derive_charges_annual(&inputs);
        let rendement_percent = self.derive_rendement_percent(&inputs);

        DerivationResult {
            achat,
            loyer_monthly: loyer_annual.and_then(|v| to_monthly(v, Period::Annual)),
            loyer_annual,
            charges_monthly: charges_annual.and_then(|v| to_monthly(v, Period::Annual)),
            charges_annual,
            rendement_percent,
            input_equivalence_loyer: self.input_equivalence(&fields.loyer),
            input_equivalence_charges: self.input_equivalence(&fields.charges),
            derived_equivalence_loyer: self.annual_equivalence(loyer_annual),
            derived_equivalence_charges: self.annual_equivalence(charges_annual),
        }
    }

    /// Converts rent and charges to annual amounts and yield to a fraction.
    fn annualize(
        &self,
        fields: &FieldStates,
    ) -> AnnualInputs {
        AnnualInputs {
            achat: fields.achat.raw_value,
            loyer_annual: fields
                .loyer
                .raw_value
                .and_then(|v| to_annual(v, fields.loyer.period)),
            charges_annual: fields
                .charges
                .raw_value
                .and_then(|v| to_annual(v, fields.charges.period)),
            rendement_fraction: fields
                .rendement
                .raw_value
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED)),
        }
    }

    /// Restates a raw input in the period opposite to the one it was typed in.
    fn input_equivalence(
        &self,
        state: &FieldState,
    ) -> Option<Equivalence> {
        let raw = state.raw_value?;
        let amount = match state.period {
            Period::Monthly => to_annual(raw, state.period)?,
            Period::Annual => to_monthly(raw, state.period)?,
        };

        Some(Equivalence {
            amount,
            per: state.period.other(),
        })
    }

    fn annual_equivalence(
        &self,
        annual: Option<Decimal>,
    ) -> Option<Equivalence> {
        annual.map(|amount| Equivalence {
            amount,
            per: Period::Annual,
        })
    }

    /// Purchase price: (annual rent - annual charges) / yield.
    fn derive_achat(
        &self,
        inputs: &AnnualInputs,
    ) -> Option<Decimal> {
        let (Some(loyer), Some(charges), Some(fraction)) = (
            inputs.loyer_annual,
            inputs.charges_annual,
            inputs.rendement_fraction,
        ) else {
            trace!("purchase price unavailable: missing input");
            return None;
        };

        if fraction.is_zero() {
            trace!("purchase price unavailable: zero yield");
            return None;
        }

        loyer.checked_sub(charges)?.checked_div(fraction)
    }

    /// Annual rent: yield × purchase price + annual charges.
    fn derive_loyer_annual(
        &self,
        inputs: &AnnualInputs,
    ) -> Option<Decimal> {
        let (Some(achat), Some(charges), Some(fraction)) =
            (inputs.achat, inputs.charges_annual, inputs.rendement_fraction)
        else {
            trace!("rent unavailable: missing input");
            return None;
        };

        fraction.checked_mul(achat)?.checked_add(charges)
    }

    /// Annual charges: annual rent - yield × purchase price.
    fn derive_charges_annual(
        &self,
        inputs: &AnnualInputs,
    ) -> Option<Decimal> {
        let (Some(achat), Some(loyer), Some(fraction)) =
            (inputs.achat, inputs.loyer_annual, inputs.rendement_fraction)
        else {
            trace!("charges unavailable: missing input");
            return None;
        };

        loyer.checked_sub(fraction.checked_mul(achat)?)
    }

    /// Yield in percent: (annual rent - annual charges) / purchase price × 100.
    fn derive_rendement_percent(
        &self,
        inputs: &AnnualInputs,
    ) -> Option<Decimal> {
        let (Some(achat), Some(loyer), Some(charges)) =
            (inputs.achat, inputs.loyer_annual, inputs.charges_annual)
        else {
            trace!("yield unavailable: missing input");
            return None;
        };

        if achat.is_zero() {
            trace!("yield unavailable: zero purchase price");
            return None;
        }

        loyer
            .checked_sub(charges)?
            .checked_div(achat)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Recomputes every derived value from a snapshot of the four fields.
///
/// Shorthand for [`DerivationEngine::calculate`].
pub fn derive(fields: &FieldStates) -> DerivationResult {
    DerivationEngine::new().calculate(fields)
}
