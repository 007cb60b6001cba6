use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Field, Period};

/// The raw, unconverted value of one field and the period it was entered in.
///
/// The period is only meaningful for [`Field::Loyer`] and [`Field::Charges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldState {
    pub raw_value: Option<Decimal>,
    #[serde(default)]
    pub period: Period,
}

impl FieldState {
    pub fn new(raw_value: Option<Decimal>) -> Self {
        Self {
            raw_value,
            period: Period::Monthly,
        }
    }

    pub fn with_period(
        raw_value: Option<Decimal>,
        period: Period,
    ) -> Self {
        Self { raw_value, period }
    }
}

/// Snapshot of all four fields, owned by the caller and handed to the engine.
///
/// `Default` is the reset state: every value absent, every period monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldStates {
    #[serde(default)]
    pub achat: FieldState,
    #[serde(default)]
    pub loyer: FieldState,
    #[serde(default)]
    pub charges: FieldState,
    #[serde(default)]
    pub rendement: FieldState,
}

impl FieldStates {
    pub fn get(
        &self,
        field: Field,
    ) -> &FieldState {
        match field {
            Field::Achat => &self.achat,
            Field::Loyer => &self.loyer,
            Field::Charges => &self.charges,
            Field::Rendement => &self.rendement,
        }
    }

    pub fn get_mut(
        &mut self,
        field: Field,
    ) -> &mut FieldState {
        match field {
            Field::Achat => &mut self.achat,
            Field::Loyer => &mut self.loyer,
            Field::Charges => &mut self.charges,
            Field::Rendement => &mut self.rendement,
        }
    }

    /// Number of fields holding a value.
    pub fn present_count(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|f| self.get(**f).raw_value.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_is_blank_and_monthly() {
        let states = FieldStates::default();

        for field in Field::ALL {
            assert_eq!(states.get(field).raw_value, None);
            assert_eq!(states.get(field).period, Period::Monthly);
        }
        assert_eq!(states.present_count(), 0);
    }

    #[test]
    fn get_mut_targets_only_the_named_field() {
        let mut states = FieldStates::default();

        states.get_mut(Field::Charges).raw_value = Some(dec!(150));

        assert_eq!(states.charges.raw_value, Some(dec!(150)));
        assert_eq!(states.loyer.raw_value, None);
        assert_eq!(states.present_count(), 1);
    }
}
