//! Calculation modules for the rental yield worksheet.
//!
//! `common` holds rounding and period conversion shared by the engine and the
//! presentation layer; `derivation` holds the engine itself.

pub mod common;
pub mod derivation;

pub use derivation::{DerivationEngine, derive};
