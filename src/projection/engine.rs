//! Core projection engine for yearly compound-interest projections

use crate::params::InvestmentParameters;
use super::yearly::{ProjectionResult, YearlyProjection};
use log::debug;

/// Main projection engine
///
/// Each year the full annual contribution (12 monthly deposits) is added as a
/// lump sum first, then interest is earned on the whole balance. Deposits made
/// in year N therefore earn a full year of interest in year N.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run projection for a validated parameter set
    pub fn project(&self, params: &InvestmentParameters) -> ProjectionResult {
        let mut result = ProjectionResult::new(*params);
        let mut balance = params.initial_capital();
        let annual_contribution = params.annual_contribution();

        for year in 1..=params.term_years() {
            // Contributions land before interest is computed
            balance += annual_contribution;
            let interest_earned = balance * params.annual_rate();
            balance += interest_earned;

            let cumulative_contributions = annual_contribution * year as f64;
            let row = YearlyProjection {
                year,
                cumulative_contributions,
                cumulative_return: balance - params.initial_capital() - cumulative_contributions,
                ending_balance: balance,
            };

            debug!(
                "year {}: interest {:.2}, balance {:.2}",
                year, interest_earned, balance
            );
            result.add_year(row);
        }

        result
    }
}

/// Project with the default engine
pub fn project(params: &InvestmentParameters) -> ProjectionResult {
    ProjectionEngine::new().project(params)
}
