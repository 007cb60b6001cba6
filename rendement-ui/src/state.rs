//! Session state for the rental yield worksheet.
//!
//! The state owns the mutable [`FieldStates`] snapshot together with the text
//! the user typed for each field. It is the only place where values change;
//! the engine only ever sees a copy.

use rendement_core::calculations::common::convert_raw_value;
use rendement_core::{Field, FieldStates, Period};
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_optional_decimal;

/// Errors raised by state mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// Purchase price and yield have no period to switch.
    #[error("{0} has no period (only loyer and charges do)")]
    NoPeriod(Field),
}

fn slot(field: Field) -> usize {
    match field {
        Field::Achat => 0,
        Field::Loyer => 1,
        Field::Charges => 2,
        Field::Rendement => 3,
    }
}

/// Field values and periods as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    fields: FieldStates,
    texts: [String; 4],
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from values that were already parsed, e.g. from CLI
    /// flags or a CSV row.
    pub fn from_fields(fields: FieldStates) -> Self {
        let mut state = Self {
            fields,
            ..Self::default()
        };
        for field in Field::ALL {
            if let Some(value) = fields.get(field).raw_value {
                state.texts[slot(field)] = value.normalize().to_string();
            }
        }
        state
    }

    pub fn fields(&self) -> &FieldStates {
        &self.fields
    }

    /// Copy of the current values, to hand to the engine.
    pub fn snapshot(&self) -> FieldStates {
        self.fields
    }

    /// The text currently shown in `field`'s input box.
    pub fn text(
        &self,
        field: Field,
    ) -> &str {
        &self.texts[slot(field)]
    }

    pub fn period(
        &self,
        field: Field,
    ) -> Period {
        self.fields.get(field).period
    }

    /// Stores what the user typed. Blank or malformed text leaves the field absent.
    pub fn set_input(
        &mut self,
        field: Field,
        text: &str,
    ) {
        let value = parse_optional_decimal(text);
        debug!(%field, input = %text, ?value, "field edited");

        self.fields.get_mut(field).raw_value = value;
        self.texts[slot(field)] = text.trim().to_string();
    }

    pub fn clear(
        &mut self,
        field: Field,
    ) {
        self.set_input(field, "");
    }

    /// Switches `field` to `period`, rescaling its stored value.
    ///
    /// Returns `false` when the field was already in that period. Other fields
    /// are never touched.
    pub fn set_period(
        &mut self,
        field: Field,
        period: Period,
    ) -> Result<bool, StateError> {
        if !field.has_period() {
            return Err(StateError::NoPeriod(field));
        }

        let state = self.fields.get_mut(field);
        if state.period == period {
            return Ok(false);
        }

        if let Some(value) = state.raw_value {
            let converted = convert_raw_value(value, state.period, period);
            if converted != value {
                state.raw_value = Some(converted);
                self.texts[slot(field)] = converted.normalize().to_string();
            }
            debug!(%field, from = %state.period, to = %period, %value, %converted, "period switched");
        }
        state.period = period;

        Ok(true)
    }

    /// Flips `field` to the other period and returns the new one.
    pub fn toggle_period(
        &mut self,
        field: Field,
    ) -> Result<Period, StateError> {
        let next = self.period(field).other();
        self.set_period(field, next)?;
        Ok(next)
    }

    /// Clears every value and puts both periods back to monthly.
    pub fn reset(&mut self) {
        debug!("worksheet reset");
        *self = Self::default();
    }

    pub fn has_any_input(&self) -> bool {
        self.fields.present_count() > 0
    }
}
