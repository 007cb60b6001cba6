mod derivation_result;
mod field;
mod field_state;

pub use derivation_result::{DerivationResult, Equivalence};
pub use field::{Field, ParseFieldError, ParsePeriodError, Period};
pub use field_state::{FieldState, FieldStates};
