//! Interactive simulation session
//!
//! Collects the four inputs one prompt at a time, re-asking a field until it
//! is valid, runs the projection, shows the report, and offers another run.
//! Cancelling any prompt abandons the whole cycle.

use crate::params::{Field, InvestmentParameters, RawInputs, RawValue, ValidationError, Validator};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::report;
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{BufRead, Write};

/// Input/output surface used by a session
pub trait Prompter {
    /// Ask for a value; `None` means the user cancelled
    fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    /// Show a short notice (errors, cancellation, farewell)
    fn alert(&mut self, message: &str) -> Result<()>;

    /// Show report output
    fn display(&mut self, text: &str) -> Result<()>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Line-oriented prompter over any reader/writer pair (stdin/stdout in the CLI)
///
/// End of input or the word `cancel` cancels a prompt.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line; bytes that are not UTF-8 become replacement characters
    /// and then fail validation like any other malformed value
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;

        let line = self.read_line()?;
        Ok(line.filter(|l| !l.trim().eq_ignore_ascii_case("cancel")))
    }

    fn alert(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "\n{}\n", message)?;
        Ok(())
    }

    fn display(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.output, "{} [y/N] ", message)?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// How a single ask-compute-display cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(ProjectionResult),
    Cancelled,
}

/// Interactive session driving one or more simulation cycles
pub struct Session<P> {
    prompter: P,
    validator: Validator,
    engine: ProjectionEngine,
}

impl<P: Prompter> Session<P> {
    pub fn new(prompter: P, validator: Validator) -> Self {
        Self {
            prompter,
            validator,
            engine: ProjectionEngine::new(),
        }
    }

    /// Get reference to the prompter
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run cycles until the user declines another one
    ///
    /// Returns the number of completed (not cancelled) simulations.
    pub fn run(&mut self) -> Result<u32> {
        let mut completed = 0;

        loop {
            if let CycleOutcome::Completed(_) = self.run_cycle()? {
                completed += 1;
            }
            if !self.prompter.confirm("Run another simulation?")? {
                break;
            }
        }

        info!("session finished after {} completed simulation(s)", completed);
        self.prompter
            .alert("Thanks for using the investment simulator. Goodbye!")?;
        Ok(completed)
    }

    /// One ask-compute-display cycle
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        info!("starting simulation cycle");

        let params = match self.collect_parameters() {
            Ok(params) => params,
            Err(err) if is_abandoned(&err) => {
                info!("simulation cancelled during input");
                self.prompter.alert("Simulation cancelled by the user.")?;
                return Ok(CycleOutcome::Cancelled);
            }
            Err(err) => return Err(err),
        };

        let result = self.engine.project(&params);

        let mut text = Vec::new();
        report::write_header(&mut text, &result.params)?;
        report::write_table(&mut text, &result)?;
        self.prompter.display(&String::from_utf8_lossy(&text))?;
        self.prompter.alert(&report::summary_message(&result.summary()))?;

        Ok(CycleOutcome::Completed(result))
    }

    /// Ask for all four inputs, retrying each until valid
    ///
    /// A cancelled prompt stops immediately with
    /// [`ValidationError::InputAbandoned`]; later fields are not asked.
    pub fn collect_parameters(&mut self) -> Result<InvestmentParameters> {
        let bounds = self.validator.bounds();

        let capital = self.ask(
            Field::InitialCapital,
            "Welcome to the investment simulator.\nEnter your initial capital:",
            Validator::initial_capital,
        )?;
        let contribution = self.ask(
            Field::MonthlyContribution,
            "Enter the monthly contribution you will make:",
            Validator::monthly_contribution,
        )?;
        let term = self.ask(
            Field::TermYears,
            &format!(
                "Enter the investment term in years (between {} and {}):",
                bounds.min(),
                bounds.max()
            ),
            Validator::term_years,
        )?;
        let mut raw = RawInputs {
            initial_capital: Some(capital),
            monthly_contribution: Some(contribution),
            term_years: Some(term),
            annual_rate: None,
        };

        // The rate is re-asked until the whole set projects to finite values
        loop {
            raw.annual_rate = Some(self.ask(
                Field::AnnualRate,
                "Enter the expected annual interest rate (e.g. 8.5 for 8.5%):",
                Validator::annual_rate,
            )?);

            match self.validator.validate(&raw) {
                Ok(params) => return Ok(params),
                Err(ValidationError::InvalidInput { field, message: reason }) => {
                    warn!("rejected {} for the combined inputs: {}", field, reason);
                    self.prompter.alert(&format!("Error: {}.", reason))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Prompt for one field until `check` accepts it, returning the accepted raw value
    fn ask<T>(
        &mut self,
        field: Field,
        message: &str,
        check: fn(&Validator, &RawValue) -> Result<T, ValidationError>,
    ) -> Result<RawValue> {
        loop {
            let Some(text) = self.prompter.prompt(message)? else {
                return Err(ValidationError::InputAbandoned.into());
            };

            let raw = RawValue::Text(text);
            match check(&self.validator, &raw) {
                Ok(_) => return Ok(raw),
                Err(ValidationError::InvalidInput { message: reason, .. }) => {
                    warn!("rejected {} input {:?}: {}", field, raw, reason);
                    self.prompter.alert(&format!("Error: {}.", reason))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn is_abandoned(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::InputAbandoned)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Prompter replaying canned answers and recording everything shown
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<Option<&'static str>>,
        confirms: VecDeque<bool>,
        prompts: Vec<String>,
        alerts: Vec<String>,
        displayed: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[Option<&'static str>], confirms: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                confirms: confirms.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn prompt(&mut self, message: &str) -> Result<Option<String>> {
            self.prompts.push(message.to_string());
            let answer = self.answers.pop_front().expect("script ran out of answers");
            Ok(answer.map(str::to_string))
        }

        fn alert(&mut self, message: &str) -> Result<()> {
            self.alerts.push(message.to_string());
            Ok(())
        }

        fn display(&mut self, text: &str) -> Result<()> {
            self.displayed.push(text.to_string());
            Ok(())
        }

        fn confirm(&mut self, _message: &str) -> Result<bool> {
            Ok(self.confirms.pop_front().unwrap_or(false))
        }
    }

    fn session(answers: &[Option<&'static str>], confirms: &[bool]) -> Session<ScriptedPrompter> {
        Session::new(ScriptedPrompter::new(answers, confirms), Validator::default())
    }

    #[test]
    fn test_cycle_completes() {
        let mut s = session(&[Some("1000"), Some("100"), Some("1"), Some("12")], &[]);

        let CycleOutcome::Completed(result) = s.run_cycle().unwrap() else {
            panic!("expected completed cycle");
        };
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result.years[0].ending_balance, 2464.0, max_relative = 1e-12);

        let p = s.prompter();
        assert_eq!(p.prompts.len(), 4);
        assert!(p.prompts[2].contains("between 1 and 50"));
        assert_eq!(p.displayed.len(), 1);
        assert!(p.alerts[0].starts_with("After 1 years"));
    }

    #[test]
    fn test_invalid_field_is_reasked_alone() {
        let mut s = session(
            &[
                Some("1000"),
                Some("-5"),
                Some("abc"),
                Some("100"),
                Some("51"),
                Some("10"),
                Some("0"),
                Some("8.5"),
            ],
            &[],
        );

        let params = s.collect_parameters().unwrap();
        assert_relative_eq!(params.monthly_contribution(), 100.0);
        assert_eq!(params.term_years(), 10);
        assert_relative_eq!(params.annual_rate(), 0.085);

        let p = s.prompter();
        // capital asked once, contribution three times, term twice, rate twice
        assert_eq!(p.prompts.len(), 8);
        assert_eq!(p.prompts[1], p.prompts[2]);
        assert_eq!(p.prompts[1], p.prompts[3]);
        assert_eq!(p.alerts.len(), 4);
        assert!(p.alerts[0].contains("monthly contribution"));
        assert!(p.alerts[2].contains("between 1 and 50"));
        assert!(p.alerts[3].contains("interest rate"));
    }

    #[test]
    fn test_cancel_abandons_whole_cycle() {
        let mut s = session(&[Some("1000"), Some("100"), None], &[]);

        assert_eq!(s.run_cycle().unwrap(), CycleOutcome::Cancelled);

        let p = s.prompter();
        // rate prompt never shown
        assert_eq!(p.prompts.len(), 3);
        assert!(p.displayed.is_empty());
        assert_eq!(p.alerts, vec!["Simulation cancelled by the user.".to_string()]);
    }

    #[test]
    fn test_collect_reports_abandonment() {
        let mut s = session(&[None], &[]);
        let err = s.collect_parameters().unwrap_err();
        assert!(is_abandoned(&err));
    }

    #[test]
    fn test_run_repeats_until_declined() {
        let mut s = session(
            &[
                Some("1000"), Some("0"), Some("2"), Some("10"),
                None,
                Some("0"), Some("50"), Some("3"), Some("4"),
            ],
            &[true, true, false],
        );

        assert_eq!(s.run().unwrap(), 2);

        let p = s.prompter();
        assert_eq!(p.displayed.len(), 2);
        assert!(p.alerts.iter().any(|a| a == "Simulation cancelled by the user."));
        assert!(p.alerts.last().unwrap().contains("Goodbye"));
    }

    #[test]
    fn test_custom_bounds_in_prompt() {
        let bounds = crate::params::TermBounds::new(5, 10).unwrap();
        let prompter = ScriptedPrompter::new(&[Some("0"), Some("0"), Some("4"), Some("5"), Some("1")], &[]);
        let mut s = Session::new(prompter, Validator::new(bounds));

        let params = s.collect_parameters().unwrap();
        assert_eq!(params.term_years(), 5);
        assert!(s.prompter().prompts[2].contains("between 5 and 10"));
    }

    #[test]
    fn test_console_prompter() {
        let input = Cursor::new("1000\n100\r\n 1 \n12\ny\n500\ncancel\nn\n");
        let mut output = Vec::new();
        let mut s = Session::new(ConsolePrompter::new(input, &mut output), Validator::default());

        assert_eq!(s.run().unwrap(), 1);
        drop(s);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("$2464.00"));
        assert!(text.contains("Simulation cancelled by the user."));
        assert!(text.contains("Goodbye"));
    }

    #[test]
    fn test_non_utf8_line_is_reasked() {
        let input = Cursor::new(&b"\xff\xfe\n1000\n100\n1\n12\nn\n"[..]);
        let mut output = Vec::new();
        let mut s = Session::new(ConsolePrompter::new(input, &mut output), Validator::default());

        assert_eq!(s.run().unwrap(), 1);
        drop(s);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Error: value must be a number."));
        assert!(text.contains("$2464.00"));
    }

    #[test]
    fn test_overflowing_rate_is_reasked() {
        let mut s = session(&[Some("1e300"), Some("0"), Some("50"), Some("10000"), Some("5")], &[]);

        let params = s.collect_parameters().unwrap();
        assert_relative_eq!(params.annual_rate(), 0.05);

        let p = s.prompter();
        assert_eq!(p.prompts.len(), 5);
        assert_eq!(p.prompts[3], p.prompts[4]);
        assert_eq!(p.alerts.len(), 1);
        assert!(p.alerts[0].contains("too high"));
    }

    #[test]
    fn test_console_prompter_eof_cancels() {
        let mut prompter = ConsolePrompter::new(Cursor::new(""), Vec::new());
        assert_eq!(prompter.prompt("value:").unwrap(), None);
        assert!(!prompter.confirm("again?").unwrap());
    }

    #[test]
    fn test_console_prompter_empty_line_is_not_cancel() {
        let mut prompter = ConsolePrompter::new(Cursor::new("\n"), Vec::new());
        assert_eq!(prompter.prompt("value:").unwrap(), Some(String::new()));
    }
}
