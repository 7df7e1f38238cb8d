//! Investment Simulator CLI
//!
//! Interactive by default; pass all four value flags for a one-shot run.

use anyhow::{bail, Context, Result};
use clap::Parser;
use investment_simulator::{
    params::{MAX_YEARS, MIN_YEARS},
    report, ConsolePrompter, ProjectionEngine, RawInputs, Session, TermBounds, Validator,
};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "investment-sim",
    version,
    about = "Compound-interest projection with yearly contributions"
)]
struct Cli {
    /// Initial capital (>= 0)
    #[arg(long, allow_hyphen_values = true)]
    initial_capital: Option<String>,

    /// Monthly contribution (>= 0)
    #[arg(long, allow_hyphen_values = true)]
    monthly_contribution: Option<String>,

    /// Term in whole years
    #[arg(long, allow_hyphen_values = true)]
    years: Option<String>,

    /// Annual interest rate in percent, e.g. 8.5
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<String>,

    /// Shortest accepted term
    #[arg(long, default_value_t = MIN_YEARS)]
    min_years: u32,

    /// Longest accepted term
    #[arg(long, default_value_t = MAX_YEARS)]
    max_years: u32,

    /// Write yearly rows as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,
}

/// How the binary runs, decided from the flags
#[derive(Debug)]
enum Mode {
    Interactive,
    OneShot(RawInputs),
}

impl Cli {
    fn mode(&self) -> Result<Mode> {
        let values = [
            &self.initial_capital,
            &self.monthly_contribution,
            &self.years,
            &self.rate,
        ];
        let given = values.iter().filter(|v| v.is_some()).count();

        match given {
            0 if self.csv.is_some() || self.json => {
                bail!("--csv and --json require the value flags")
            }
            0 => Ok(Mode::Interactive),
            4 => Ok(Mode::OneShot(RawInputs {
                initial_capital: self.initial_capital.clone().map(Into::into),
                monthly_contribution: self.monthly_contribution.clone().map(Into::into),
                term_years: self.years.clone().map(Into::into),
                annual_rate: self.rate.clone().map(Into::into),
            })),
            _ => bail!(
                "--initial-capital, --monthly-contribution, --years and --rate must be given together"
            ),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let bounds = TermBounds::new(cli.min_years, cli.max_years)?;
    let validator = Validator::new(bounds);

    match cli.mode()? {
        Mode::OneShot(raw) => run_once(&cli, &validator, &raw),
        Mode::Interactive => {
            let stdin = io::stdin();
            let prompter = ConsolePrompter::new(stdin.lock(), io::stdout());
            let completed = Session::new(prompter, validator).run()?;
            info!("{} simulation(s) completed", completed);
            Ok(())
        }
    }
}

fn run_once(cli: &Cli, validator: &Validator, raw: &RawInputs) -> Result<()> {
    let params = validator.validate(raw)?;
    info!(
        "projecting {} years at {:.2}%",
        params.term_years(),
        params.annual_rate_pct()
    );

    let result = ProjectionEngine::new().project(&params);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        report::write_json(&mut out, &result)?;
    } else {
        report::write_report(&mut out, &result)?;
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create CSV file {}", path.display()))?;
        report::write_csv(BufWriter::new(file), &result)?;
        if !cli.json {
            writeln!(out, "\nYearly rows written to: {}", path.display())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use investment_simulator::params::RawValue;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("investment-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_value_flags_is_interactive() {
        assert!(matches!(parse(&[]).mode().unwrap(), Mode::Interactive));
        assert!(matches!(
            parse(&["--min-years", "5", "--max-years", "10"]).mode().unwrap(),
            Mode::Interactive
        ));
    }

    #[test]
    fn test_all_value_flags_is_one_shot() {
        let cli = parse(&[
            "--initial-capital", "1000",
            "--monthly-contribution", "100",
            "--years", "1",
            "--rate", "-12",
        ]);

        let Mode::OneShot(raw) = cli.mode().unwrap() else {
            panic!("expected one-shot mode");
        };
        assert_eq!(raw.initial_capital, Some(RawValue::Text("1000".into())));
        assert_eq!(raw.annual_rate, Some(RawValue::Text("-12".into())));
    }

    #[test]
    fn test_partial_value_flags_rejected() {
        let err = parse(&["--initial-capital", "1000", "--years", "5"])
            .mode()
            .unwrap_err();
        assert!(err.to_string().contains("must be given together"));
    }

    #[test]
    fn test_export_without_values_rejected() {
        assert!(parse(&["--json"]).mode().is_err());
        assert!(parse(&["--csv", "out.csv"]).mode().is_err());
    }

    #[test]
    fn test_bounds_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.min_years, MIN_YEARS);
        assert_eq!(cli.max_years, MAX_YEARS);
    }
}
