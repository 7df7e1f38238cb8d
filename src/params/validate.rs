//! Validation rules turning raw inputs into [`InvestmentParameters`]

use super::data::{Field, InvestmentParameters, RawInputs, RawValue};
use crate::projection::ProjectionEngine;
use thiserror::Error;

/// Shortest allowed term in years
pub const MIN_YEARS: u32 = 1;

/// Longest allowed term in years
pub const MAX_YEARS: u32 = 50;

/// Errors produced while validating simulation inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A single field failed parsing or its range check
    #[error("invalid {field}: {message}")]
    InvalidInput { field: Field, message: String },

    /// Input collection was abandoned before every field was valid
    #[error("input abandoned before all values were provided")]
    InputAbandoned,

    /// Term bounds that cannot hold any term
    #[error("invalid term bounds: {min}..={max} (minimum must be at least 1 and not above maximum)")]
    InvalidBounds { min: u32, max: u32 },
}

impl ValidationError {
    fn invalid(field: Field, message: impl Into<String>) -> Self {
        ValidationError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Field this error refers to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Inclusive range of accepted terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermBounds {
    min: u32,
    max: u32,
}

impl TermBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, ValidationError> {
        if min < 1 || min > max {
            return Err(ValidationError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, years: u32) -> bool {
        (self.min..=self.max).contains(&years)
    }
}

impl Default for TermBounds {
    fn default() -> Self {
        Self {
            min: MIN_YEARS,
            max: MAX_YEARS,
        }
    }
}

/// Validates raw inputs against the simulator's rules
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    bounds: TermBounds,
}

impl Validator {
    pub fn new(bounds: TermBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> TermBounds {
        self.bounds
    }

    /// Validate all four inputs at once
    ///
    /// A missing field is checked before anything is parsed, so a cancelled
    /// prompt always reports `InputAbandoned` rather than a field error.
    ///
    /// Parameters whose projection would overflow `f64` are rejected on the
    /// rate field, the only input without its own upper limit.
    pub fn validate(&self, raw: &RawInputs) -> Result<InvestmentParameters, ValidationError> {
        let (Some(capital), Some(contribution), Some(term), Some(rate)) = (
            raw.initial_capital.as_ref(),
            raw.monthly_contribution.as_ref(),
            raw.term_years.as_ref(),
            raw.annual_rate.as_ref(),
        ) else {
            return Err(ValidationError::InputAbandoned);
        };

        let params = InvestmentParameters::from_parts(
            self.initial_capital(capital)?,
            self.monthly_contribution(contribution)?,
            self.term_years(term)?,
            self.annual_rate(rate)?,
        );

        let projected = ProjectionEngine::new().project(&params);
        let representable = projected
            .final_year()
            .is_some_and(|y| y.ending_balance.is_finite() && y.cumulative_return.is_finite());
        if !representable {
            return Err(ValidationError::invalid(
                Field::AnnualRate,
                "annual interest rate is too high for these amounts and term",
            ));
        }

        Ok(params)
    }

    /// Initial capital: any real number >= 0
    pub fn initial_capital(&self, raw: &RawValue) -> Result<f64, ValidationError> {
        let field = Field::InitialCapital;
        let value = parse_real(field, raw)?;
        if value < 0.0 {
            return Err(ValidationError::invalid(
                field,
                "initial capital must be zero or a positive number",
            ));
        }
        Ok(value)
    }

    /// Monthly contribution: any real number >= 0 whose total over the
    /// longest allowed term is still finite
    pub fn monthly_contribution(&self, raw: &RawValue) -> Result<f64, ValidationError> {
        let field = Field::MonthlyContribution;
        let value = parse_real(field, raw)?;
        if value < 0.0 {
            return Err(ValidationError::invalid(
                field,
                "monthly contribution must be zero or a positive number",
            ));
        }
        if !(value * 12.0 * self.bounds.max as f64).is_finite() {
            return Err(ValidationError::invalid(field, "monthly contribution is too large"));
        }
        Ok(value)
    }

    /// Term: a whole number of years within the configured bounds
    pub fn term_years(&self, raw: &RawValue) -> Result<u32, ValidationError> {
        let field = Field::TermYears;
        let out_of_range = || {
            ValidationError::invalid(
                field,
                format!(
                    "term must be a whole number of years between {} and {}",
                    self.bounds.min, self.bounds.max
                ),
            )
        };

        let years = match raw {
            RawValue::Text(text) => text.trim().parse::<i64>().map_err(|_| out_of_range())?,
            RawValue::Number(n) if n.is_finite() && n.fract() == 0.0 => *n as i64,
            RawValue::Number(_) => return Err(out_of_range()),
        };

        u32::try_from(years)
            .ok()
            .filter(|&y| self.bounds.contains(y))
            .ok_or_else(out_of_range)
    }

    /// Annual rate in percent, strictly positive; returned as a decimal fraction
    pub fn annual_rate(&self, raw: &RawValue) -> Result<f64, ValidationError> {
        let field = Field::AnnualRate;
        let pct = parse_real(field, raw)?;
        if pct <= 0.0 {
            return Err(ValidationError::invalid(
                field,
                "annual interest rate must be a positive number",
            ));
        }
        Ok(pct / 100.0)
    }
}

/// Validate with the default term bounds
pub fn validate(raw: &RawInputs) -> Result<InvestmentParameters, ValidationError> {
    Validator::default().validate(raw)
}

fn parse_real(field: Field, raw: &RawValue) -> Result<f64, ValidationError> {
    let value = match raw {
        RawValue::Text(text) => text.trim().parse::<f64>().ok(),
        RawValue::Number(n) => Some(*n),
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::invalid(field, "value must be a number"))
}
