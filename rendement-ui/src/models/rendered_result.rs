use std::fmt;

use rendement_core::{DerivationResult, Field};
use serde::Serialize;

use crate::config::DisplayConfig;
use crate::format::{ValueKind, format_optional_equivalence, format_value};

/// Display strings for one recomputation, ready to be placed on screen.
///
/// Unavailable values hold the configured placeholder; missing equivalences
/// are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    pub achat: String,
    pub loyer: String,
    pub loyer_annual: String,
    pub charges: String,
    pub charges_annual: String,
    pub rendement: String,

    pub input_equivalence_loyer: String,
    pub input_equivalence_charges: String,
    pub derived_equivalence_loyer: String,
    pub derived_equivalence_charges: String,
}

impl RenderedResult {
    pub fn from_result(
        result: &DerivationResult,
        display: &DisplayConfig,
    ) -> Self {
        let placeholder = display.placeholder.as_str();
        let euro = |v| format_value(v, ValueKind::Currency, placeholder);

        Self {
            achat: euro(result.derived(Field::Achat)),
            loyer: euro(result.derived(Field::Loyer)),
            loyer_annual: euro(result.derived_annual(Field::Loyer)),
            charges: euro(result.derived(Field::Charges)),
            charges_annual: euro(result.derived_annual(Field::Charges)),
            rendement: format_value(result.rendement_percent, ValueKind::Percent, placeholder),
            input_equivalence_loyer: format_optional_equivalence(
                result.input_equivalence_loyer.as_ref(),
            ),
            input_equivalence_charges: format_optional_equivalence(
                result.input_equivalence_charges.as_ref(),
            ),
            derived_equivalence_loyer: format_optional_equivalence(
                result.derived_equivalence_loyer.as_ref(),
            ),
            derived_equivalence_charges: format_optional_equivalence(
                result.derived_equivalence_charges.as_ref(),
            ),
        }
    }

    /// Rendered value of the calculation column for `field`.
    pub fn derived(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::Achat => &self.achat,
            Field::Loyer => &self.loyer,
            Field::Charges => &self.charges,
            Field::Rendement => &self.rendement,
        }
    }

    pub fn input_equivalence(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::Loyer => &self.input_equivalence_loyer,
            Field::Charges => &self.input_equivalence_charges,
            Field::Achat | Field::Rendement => "",
        }
    }

    pub fn derived_equivalence(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::Loyer => &self.derived_equivalence_loyer,
            Field::Charges => &self.derived_equivalence_charges,
            Field::Achat | Field::Rendement => "",
        }
    }
}

impl fmt::Display for RenderedResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "achat={} loyer={} charges={} rendement={}",
            self.achat, self.loyer, self.charges, self.rendement
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rendement_core::{FieldState, FieldStates, Period, derive};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn renders_price_example() {
        let fields = FieldStates {
            achat: FieldState::new(None),
            loyer: FieldState::with_period(Some(dec!(1000)), Period::Monthly),
            charges: FieldState::with_period(Some(dec!(100)), Period::Monthly),
            rendement: FieldState::new(Some(dec!(5))),
        };

        let rendered = RenderedResult::from_result(&derive(&fields), &DisplayConfig::default());

        assert_eq!(rendered.achat, "216\u{202f}000\u{a0}€");
        assert_eq!(rendered.loyer, "--");
        assert_eq!(rendered.loyer_annual, "--");
        assert_eq!(rendered.rendement, "--");
        assert_eq!(rendered.input_equivalence_loyer, "soit 12\u{202f}000\u{a0}€/an");
        assert_eq!(rendered.input_equivalence_charges, "soit 1\u{202f}200\u{a0}€/an");
        assert_eq!(rendered.derived_equivalence_loyer, "");
    }

    #[test]
    fn renders_derived_rent_with_annual_equivalence() {
        let fields = FieldStates {
            achat: FieldState::new(Some(dec!(200000))),
            loyer: FieldState::default(),
            charges: FieldState::with_period(Some(dec!(2000)), Period::Annual),
            rendement: FieldState::new(Some(dec!(5))),
        };

        let rendered = RenderedResult::from_result(&derive(&fields), &DisplayConfig::default());

        assert_eq!(rendered.loyer, "1\u{202f}000\u{a0}€");
        assert_eq!(rendered.loyer_annual, "12\u{202f}000\u{a0}€");
        assert_eq!(rendered.derived_equivalence_loyer, "soit 12\u{202f}000\u{a0}€/an");
        assert_eq!(rendered.input_equivalence_charges, "soit 166,67\u{a0}€/mois");
    }

    #[test]
    fn custom_placeholder_is_used() {
        let display = DisplayConfig {
            placeholder: "n/d".to_string(),
        };

        let rendered = RenderedResult::from_result(&DerivationResult::default(), &display);

        for field in Field::ALL {
            assert_eq!(rendered.derived(field), "n/d");
        }
        assert_eq!(rendered.input_equivalence(Field::Loyer), "");
    }
}
