pub mod calculations;
pub mod models;

pub use calculations::{DerivationEngine, derive};
pub use models::*;
