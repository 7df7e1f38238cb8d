//! Yearly output structures for projections

use crate::params::InvestmentParameters;
use serde::Serialize;

/// State of the account at the end of one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Contributions deposited through the end of this year
    pub cumulative_contributions: f64,

    /// Growth attributable to interest
    /// (ending balance less initial capital and contributions)
    pub cumulative_return: f64,

    /// Balance after this year's contributions and interest
    pub ending_balance: f64,
}

/// Complete projection for one set of parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Parameters the projection was computed from
    pub params: InvestmentParameters,

    /// One entry per year, in increasing year order
    pub years: Vec<YearlyProjection>,
}

impl ProjectionResult {
    pub(super) fn new(params: InvestmentParameters) -> Self {
        Self {
            params,
            years: Vec::with_capacity(params.term_years() as usize),
        }
    }

    pub(super) fn add_year(&mut self, year: YearlyProjection) {
        self.years.push(year);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearlyProjection> {
        self.years.iter()
    }

    /// Last projected year
    pub fn final_year(&self) -> Option<&YearlyProjection> {
        self.years.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.final_year();

        ProjectionSummary {
            term_years: self.params.term_years(),
            initial_capital: self.params.initial_capital(),
            total_contributions: last.map(|y| y.cumulative_contributions).unwrap_or(0.0),
            total_return: last.map(|y| y.cumulative_return).unwrap_or(0.0),
            final_balance: last
                .map(|y| y.ending_balance)
                .unwrap_or_else(|| self.params.initial_capital()),
        }
    }
}

impl<'a> IntoIterator for &'a ProjectionResult {
    type Item = &'a YearlyProjection;
    type IntoIter = std::slice::Iter<'a, YearlyProjection>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.iter()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub term_years: u32,
    pub initial_capital: f64,
    pub total_contributions: f64,
    pub total_return: f64,
    pub final_balance: f64,
}
