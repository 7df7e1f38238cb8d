//! Simulation inputs: raw user values, validated parameters, and the rules between them

mod data;
mod validate;

pub use data::{Field, InvestmentParameters, RawInputs, RawValue};
pub use validate::{validate, TermBounds, ValidationError, Validator, MAX_YEARS, MIN_YEARS};
