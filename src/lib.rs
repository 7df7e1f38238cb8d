//! Investment Simulator - compound-interest projections with monthly contributions
//!
//! This library provides:
//! - Validation of raw user inputs into investment parameters
//! - Year-by-year balance, contribution and return projections
//! - Console, CSV and JSON rendering of results
//! - An interactive prompt-driven session

pub mod params;
pub mod projection;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use params::{validate, InvestmentParameters, RawInputs, TermBounds, ValidationError, Validator};
pub use projection::{project, ProjectionEngine, ProjectionResult, YearlyProjection};
pub use session::{ConsolePrompter, Prompter, Session};
