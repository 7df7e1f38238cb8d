//! Input data structures for a single simulation run

use serde::Serialize;
use std::fmt;

/// One of the four values collected from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    InitialCapital,
    MonthlyContribution,
    TermYears,
    AnnualRate,
}

impl Field {
    /// All fields in collection order
    pub const ALL: [Field; 4] = [
        Field::InitialCapital,
        Field::MonthlyContribution,
        Field::TermYears,
        Field::AnnualRate,
    ];

    /// Identifier used in error reports and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::InitialCapital => "initialCapital",
            Field::MonthlyContribution => "monthlyContribution",
            Field::TermYears => "termYears",
            Field::AnnualRate => "annualRate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value as supplied by the caller, before any validation
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text as typed by the user
    Text(String),
    /// An already-numeric value (CLI flags, programmatic callers)
    Number(f64),
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(value as f64)
    }
}

/// The four raw inputs of a run
///
/// A `None` field means the user cancelled that prompt. Validation turns any
/// `None` into [`ValidationError::InputAbandoned`](super::ValidationError)
/// before looking at the other fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInputs {
    pub initial_capital: Option<RawValue>,
    pub monthly_contribution: Option<RawValue>,
    pub term_years: Option<RawValue>,
    pub annual_rate: Option<RawValue>,
}

impl RawInputs {
    /// Build a fully-populated input set
    pub fn new(
        initial_capital: impl Into<RawValue>,
        monthly_contribution: impl Into<RawValue>,
        term_years: impl Into<RawValue>,
        annual_rate: impl Into<RawValue>,
    ) -> Self {
        Self {
            initial_capital: Some(initial_capital.into()),
            monthly_contribution: Some(monthly_contribution.into()),
            term_years: Some(term_years.into()),
            annual_rate: Some(annual_rate.into()),
        }
    }

    /// Raw value for a field, if one was supplied
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        match field {
            Field::InitialCapital => self.initial_capital.as_ref(),
            Field::MonthlyContribution => self.monthly_contribution.as_ref(),
            Field::TermYears => self.term_years.as_ref(),
            Field::AnnualRate => self.annual_rate.as_ref(),
        }
    }
}

/// Validated parameters for one simulation run
///
/// Only obtainable through [`Validator`](super::Validator), so every instance
/// has all four fields in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentParameters {
    initial_capital: f64,
    monthly_contribution: f64,
    term_years: u32,
    /// Decimal fraction (8.5% is stored as 0.085)
    annual_rate: f64,
}

impl InvestmentParameters {
    pub(super) fn from_parts(
        initial_capital: f64,
        monthly_contribution: f64,
        term_years: u32,
        annual_rate: f64,
    ) -> Self {
        Self {
            initial_capital,
            monthly_contribution,
            term_years,
            annual_rate,
        }
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Annual rate as a decimal fraction
    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Annual rate in percent, as the user entered it
    pub fn annual_rate_pct(&self) -> f64 {
        self.annual_rate * 100.0
    }

    /// Contributions deposited over one full year
    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution * 12.0
    }
}
