use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Field, Period};

/// An amount restated in a given period, shown beside a rent or charges field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equivalence {
    pub amount: Decimal,
    pub per: Period,
}

/// Everything the worksheet shows after one recomputation.
///
/// `None` means the value is unavailable: one of its inputs is missing or the
/// formula would divide by zero. The result carries no state of its own and is
/// rebuilt from scratch on every change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivationResult {
    /// Purchase price derived from rent, charges and yield.
    pub achat: Option<Decimal>,

    /// Monthly rent derived from purchase price, charges and yield.
    pub loyer_monthly: Option<Decimal>,
    pub loyer_annual: Option<Decimal>,

    /// Monthly charges derived from purchase price, rent and yield.
    pub charges_monthly: Option<Decimal>,
    pub charges_annual: Option<Decimal>,

    /// Yield in percent derived from purchase price, rent and charges.
    pub rendement_percent: Option<Decimal>,

    // Restatements of the raw inputs in the opposite period
    pub input_equivalence_loyer: Option<Equivalence>,
    pub input_equivalence_charges: Option<Equivalence>,

    // Restatements of the derived values, always annual
    pub derived_equivalence_loyer: Option<Equivalence>,
    pub derived_equivalence_charges: Option<Equivalence>,
}

impl DerivationResult {
    /// The derived value displayed in the calculation column for `field`.
    ///
    /// Rent and charges are reported monthly.
    pub fn derived(
        &self,
        field: Field,
    ) -> Option<Decimal> {
        match field {
            Field::Achat => self.achat,
            Field::Loyer => self.loyer_monthly,
            Field::Charges => self.charges_monthly,
            Field::Rendement => self.rendement_percent,
        }
    }

    /// The annual form of a derived rent or charges value.
    pub fn derived_annual(
        &self,
        field: Field,
    ) -> Option<Decimal> {
        match field {
            Field::Loyer => self.loyer_annual,
            Field::Charges => self.charges_annual,
            Field::Achat | Field::Rendement => None,
        }
    }

    pub fn input_equivalence(
        &self,
        field: Field,
    ) -> Option<Equivalence> {
        match field {
            Field::Loyer => self.input_equivalence_loyer,
            Field::Charges => self.input_equivalence_charges,
            Field::Achat | Field::Rendement => None,
        }
    }

    pub fn derived_equivalence(
        &self,
        field: Field,
    ) -> Option<Equivalence> {
        match field {
            Field::Loyer => self.derived_equivalence_loyer,
            Field::Charges => self.derived_equivalence_charges,
            Field::Achat | Field::Rendement => None,
        }
    }
}
