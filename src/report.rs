//! Rendering of projection results: console table, summary, CSV and JSON export

use crate::params::InvestmentParameters;
use crate::projection::{ProjectionResult, ProjectionSummary};
use anyhow::{Context, Result};
use std::io::Write;

/// Write the parameter header shown above the table
pub fn write_header<W: Write>(out: &mut W, params: &InvestmentParameters) -> Result<()> {
    writeln!(out, "{}", "=".repeat(66))?;
    writeln!(out, "Investment projection")?;
    writeln!(out, "{}", "=".repeat(66))?;
    writeln!(out, "Initial Capital:      ${:.2}", params.initial_capital())?;
    writeln!(out, "Monthly Contribution: ${:.2}", params.monthly_contribution())?;
    writeln!(out, "Term:                 {} years", params.term_years())?;
    writeln!(out, "Annual Rate:          {:.2}%", params.annual_rate_pct())?;
    writeln!(out, "{}", "-".repeat(66))?;
    Ok(())
}

/// Write one line per projected year
pub fn write_table<W: Write>(out: &mut W, result: &ProjectionResult) -> Result<()> {
    writeln!(
        out,
        "{:>5} {:>18} {:>20} {:>18}",
        "Year", "Ending Balance", "Total Contributions", "Total Return"
    )?;
    writeln!(out, "{}", "-".repeat(66))?;

    for row in result {
        writeln!(
            out,
            "{:>5} {:>18} {:>20} {:>18}",
            row.year,
            money(row.ending_balance),
            money(row.cumulative_contributions),
            money(row.cumulative_return),
        )?;
    }
    Ok(())
}

/// Closing summary of a run
pub fn summary_message(summary: &ProjectionSummary) -> String {
    format!(
        "After {} years your investment would reach a final balance of {}\n\n\
         Summary:\n\
         - Initial Capital: {}\n\
         - Total Contributions: {}\n\
         - Return (Gain): {}",
        summary.term_years,
        money(summary.final_balance),
        money(summary.initial_capital),
        money(summary.total_contributions),
        money(summary.total_return),
    )
}

/// Header, table and summary in one go
pub fn write_report<W: Write>(out: &mut W, result: &ProjectionResult) -> Result<()> {
    write_header(out, &result.params)?;
    write_table(out, result)?;
    writeln!(out)?;
    writeln!(out, "{}", summary_message(&result.summary()))?;
    Ok(())
}

/// Export yearly rows as CSV
pub fn write_csv<W: Write>(out: W, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in result {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write CSV row for year {}", row.year))?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Export the full result (parameters and years) as pretty JSON
pub fn write_json<W: Write>(mut out: W, result: &ProjectionResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, result).context("failed to serialize projection")?;
    writeln!(out)?;
    Ok(())
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}
