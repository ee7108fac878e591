//! Per-page drill session.
//!
//! A session waits for the user to confirm readiness, asks every operation
//! on the page in order, then prints a summary and the missed operations.
//! `Scorer` holds the pure scoring logic; `Session` wires it to a console.

use std::io::{BufRead, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::model::{OperationResult, Outcome, Page, SessionSummary};
use crate::review::review_operation;
use crate::traits::Stopwatch;

/// Default fast-solve window, measured from session start.
pub const DEFAULT_FAST_WINDOW: Duration = Duration::from_secs(120);

/// What to do when an answer is not an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Abort the whole run.
    #[default]
    Abort,
    /// Ask for the answer again.
    Reprompt,
}

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Input that starts the page.
    pub ready_token: String,
    /// Answers read before this much time has passed since the session
    /// started count as fast.
    pub fast_window: Duration,
    pub input_policy: InputPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ready_token: "yes".to_string(),
            fast_window: DEFAULT_FAST_WINDOW,
            input_policy: InputPolicy::Abort,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingReadiness,
    RunningOperations,
    Summarizing,
    Done,
}

/// Collects operation results for one page.
#[derive(Debug, Clone)]
pub struct Scorer {
    fast_window: Duration,
    results: Vec<OperationResult>,
}

impl Scorer {
    pub fn new(fast_window: Duration) -> Self {
        Self {
            fast_window,
            results: Vec::new(),
        }
    }

    /// Review `operation` against `given` and record the result.
    ///
    /// `elapsed` is the time since the session started, not since the
    /// previous operation.
    pub fn record(&mut self, operation: &str, given: i64, elapsed: Duration) -> &OperationResult {
        let outcome = match review_operation(operation, given) {
            Ok(review) if review.correct => Outcome::Correct {
                answer: review.answer,
            },
            Ok(review) => Outcome::Incorrect {
                answer: review.answer,
                given,
            },
            Err(error) => {
                tracing::debug!("could not score '{operation}': {error}");
                Outcome::Unscorable { error }
            }
        };

        self.results.push(OperationResult {
            operation: operation.to_string(),
            outcome,
            elapsed,
            fast: elapsed < self.fast_window,
        });
        let result = &self.results[self.results.len() - 1];
        tracing::debug!(
            operation,
            correct = result.outcome.is_correct(),
            fast = result.fast,
            elapsed = ?elapsed,
            "operation reviewed"
        );
        result
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_results(&self.results)
    }

    /// Results that were not answered correctly, in page order.
    pub fn misses(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.iter().filter(|r| !r.outcome.is_correct())
    }

    pub fn into_results(self) -> Vec<OperationResult> {
        self.results
    }
}

/// Everything a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub summary: SessionSummary,
    pub results: Vec<OperationResult>,
}

/// A session bound to a console and a stopwatch.
pub struct Session<'a> {
    config: &'a SessionConfig,
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    stopwatch: &'a mut dyn Stopwatch,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(
        config: &'a SessionConfig,
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        stopwatch: &'a mut dyn Stopwatch,
    ) -> Self {
        Self {
            config,
            input,
            output,
            stopwatch,
            state: SessionState::AwaitingReadiness,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the page from readiness through the printed summary.
    pub fn run(&mut self, page: &Page) -> Result<SessionReport, SessionError> {
        self.state = SessionState::AwaitingReadiness;
        self.await_readiness()?;

        self.state = SessionState::RunningOperations;
        let mut scorer = Scorer::new(self.config.fast_window);
        self.stopwatch.start();
        for line in &page.lines {
            writeln!(
                self.output,
                "What is the result for the next operation: {line}"
            )?;
            self.output.flush()?;
            let given = self.read_answer()?;
            let elapsed = self.stopwatch.elapsed();
            scorer.record(line, given, elapsed);
        }

        self.state = SessionState::Summarizing;
        let summary = scorer.summary();
        self.print_summary(&summary, &scorer)?;

        self.state = SessionState::Done;
        tracing::info!(
            page = %page.id,
            correct = summary.correct,
            fast = summary.fast,
            total = summary.total,
            "session finished"
        );

        Ok(SessionReport {
            summary,
            results: scorer.into_results(),
        })
    }

    fn await_readiness(&mut self) -> Result<(), SessionError> {
        loop {
            write!(self.output, "Are you ready to start? ")?;
            self.output.flush()?;
            if self.read_line()? == self.config.ready_token {
                return Ok(());
            }
        }
    }

    fn read_answer(&mut self) -> Result<i64, SessionError> {
        loop {
            let input = self.read_line()?;
            match input.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => match self.config.input_policy {
                    InputPolicy::Abort => return Err(SessionError::InvalidAnswer { input }),
                    InputPolicy::Reprompt => {
                        writeln!(self.output, "'{input}' is not a number, try again:")?;
                        self.output.flush()?;
                    }
                },
            }
        }
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    fn print_summary(
        &mut self,
        summary: &SessionSummary,
        scorer: &Scorer,
    ) -> Result<(), SessionError> {
        writeln!(
            self.output,
            "The user had {} correct operations",
            summary.correct
        )?;
        writeln!(
            self.output,
            "operations solved in less than {} {}",
            describe_window(self.config.fast_window),
            summary.fast
        )?;

        for miss in scorer.misses() {
            match &miss.outcome {
                Outcome::Incorrect { answer, .. } => writeln!(
                    self.output,
                    "The correct result for the operation: {} = {}",
                    miss.operation, answer
                )?,
                Outcome::Unscorable { error } => writeln!(
                    self.output,
                    "The operation could not be scored: {} ({})",
                    miss.operation, error
                )?,
                Outcome::Correct { .. } => {}
            }
        }
        self.output.flush()?;
        Ok(())
    }
}

/// Human-readable rendering of the fast window, e.g. "2 minutes".
pub fn describe_window(window: Duration) -> String {
    let secs = window.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{s} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ReviewError};
    use crate::parser::parse_page_str;
    use crate::traits::ScriptedStopwatch;
    use std::io::Cursor;

    fn run_page(
        page: &Page,
        script: &str,
        ticks: &[u64],
        config: &SessionConfig,
    ) -> (Result<SessionReport, SessionError>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let mut stopwatch = ScriptedStopwatch::from_secs(ticks);
        let result = Session::new(config, &mut input, &mut output, &mut stopwatch).run(page);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn fast_window_is_exclusive_at_threshold() {
        let mut scorer = Scorer::new(DEFAULT_FAST_WINDOW);
        assert!(scorer.record("1 + 1", 2, Duration::from_secs(119)).fast);
        assert!(!scorer.record("1 + 1", 2, Duration::from_secs(120)).fast);
        assert!(!scorer.record("1 + 1", 2, Duration::from_secs(121)).fast);
        assert_eq!(scorer.summary().fast, 1);
    }

    #[test]
    fn fast_counts_wrong_answers_too() {
        let mut scorer = Scorer::new(DEFAULT_FAST_WINDOW);
        scorer.record("2 x 3", 5, Duration::from_secs(10));
        let summary = scorer.summary();
        assert_eq!(summary.correct, 0);
        assert_eq!(summary.fast, 1);
    }

    #[test]
    fn scorer_keeps_unscorable_distinct_from_wrong() {
        let mut scorer = Scorer::new(DEFAULT_FAST_WINDOW);
        let r = scorer.record("10 / 0", 0, Duration::ZERO);
        assert_eq!(
            r.outcome,
            Outcome::Unscorable {
                error: ReviewError::Eval(EvalError::DivisionByZero)
            }
        );
    }

    #[test]
    fn misses_are_in_page_order() {
        let mut scorer = Scorer::new(DEFAULT_FAST_WINDOW);
        scorer.record("1 + 1", 3, Duration::ZERO);
        scorer.record("2 + 2", 4, Duration::ZERO);
        scorer.record("3 + 3", 0, Duration::ZERO);
        let missed: Vec<&str> = scorer.misses().map(|r| r.operation.as_str()).collect();
        assert_eq!(missed, vec!["1 + 1", "3 + 3"]);
    }

    #[test]
    fn session_end_to_end() {
        let page = parse_page_str("page-01.txt", "4 + 5\n6 x 7\n9 - 3\n");
        let (result, out) = run_page(
            &page,
            "no\nyes\n9\n40\n7\n",
            &[30, 119, 121],
            &SessionConfig::default(),
        );
        let report = result.unwrap();

        assert_eq!(
            report.summary,
            SessionSummary {
                correct: 1,
                fast: 2,
                total: 3
            }
        );
        assert_eq!(out.matches("Are you ready to start? ").count(), 2);
        assert!(out.contains("What is the result for the next operation: 6 x 7"));
        assert!(out.contains("The user had 1 correct operations"));
        assert!(out.contains("operations solved in less than 2 minutes 2"));

        let misses: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("The correct result"))
            .collect();
        assert_eq!(
            misses,
            vec![
                "The correct result for the operation: 6 x 7 = 42",
                "The correct result for the operation: 9 - 3 = 6",
            ]
        );
    }

    #[test]
    fn session_reports_unscorable_lines() {
        let page = parse_page_str("p", "bad line\n1 + 1\n");
        let (result, out) = run_page(&page, "yes\n0\n2\n", &[1, 2], &SessionConfig::default());
        assert_eq!(result.unwrap().summary.correct, 1);
        assert!(out.contains("The operation could not be scored: bad line"));
        assert!(!out.contains("The correct result for the operation: bad line"));
    }

    #[test]
    fn custom_ready_token() {
        let page = parse_page_str("p", "1 + 1\n");
        let config = SessionConfig {
            ready_token: "go".into(),
            ..Default::default()
        };
        let (result, _) = run_page(&page, "yes\ngo\n2\n", &[1], &config);
        assert_eq!(result.unwrap().summary.correct, 1);
    }

    #[test]
    fn non_integer_answer_aborts_by_default() {
        let page = parse_page_str("p", "1 + 1\n");
        let (result, _) = run_page(&page, "yes\ntwo\n", &[1], &SessionConfig::default());
        assert!(matches!(
            result,
            Err(SessionError::InvalidAnswer { input }) if input == "two"
        ));
    }

    #[test]
    fn non_integer_answer_reprompts_when_configured() {
        let page = parse_page_str("p", "1 + 1\n");
        let config = SessionConfig {
            input_policy: InputPolicy::Reprompt,
            ..Default::default()
        };
        let (result, out) = run_page(&page, "yes\ntwo\n2\n", &[1], &config);
        assert_eq!(result.unwrap().summary.correct, 1);
        assert!(out.contains("'two' is not a number"));
    }

    #[test]
    fn eof_before_ready_is_fatal() {
        let page = parse_page_str("p", "1 + 1\n");
        let (result, _) = run_page(&page, "nope\n", &[], &SessionConfig::default());
        assert!(matches!(result, Err(SessionError::InputClosed)));
    }

    #[test]
    fn eof_mid_page_is_fatal() {
        let page = parse_page_str("p", "1 + 1\n2 + 2\n");
        let (result, _) = run_page(&page, "yes\n2\n", &[1], &SessionConfig::default());
        assert!(matches!(result, Err(SessionError::InputClosed)));
    }

    #[test]
    fn state_starts_awaiting_and_ends_done() {
        let config = SessionConfig::default();
        let page = parse_page_str("p", "1 + 1\n");
        let mut input = Cursor::new(b"yes\n2\n".to_vec());
        let mut output = Vec::new();
        let mut stopwatch = ScriptedStopwatch::from_secs(&[1]);
        let mut session = Session::new(&config, &mut input, &mut output, &mut stopwatch);
        assert_eq!(session.state(), SessionState::AwaitingReadiness);
        session.run(&page).unwrap();
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn window_descriptions() {
        assert_eq!(describe_window(Duration::from_secs(120)), "2 minutes");
        assert_eq!(describe_window(Duration::from_secs(60)), "1 minute");
        assert_eq!(describe_window(Duration::from_secs(90)), "90 seconds");
    }
}
