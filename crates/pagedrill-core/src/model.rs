//! Core data model types for pagedrill.
//!
//! These are the types the parser, evaluator, scorer and record sinks
//! exchange: operations read from a page, per-operation results, the
//! per-page summary and the persisted log record.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, ReviewError};

/// Number of operations a full page is assumed to hold.
///
/// The log records `expected - correct` as the incorrect count, not the
/// number of operations the page actually contained.
pub const DEFAULT_EXPECTED_PER_PAGE: u32 = 60;

/// The four supported arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The token used for this operator on a page.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "x",
            Operator::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "x" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(EvalError::UnknownOperator {
                token: other.to_string(),
            }),
        }
    }
}

/// A parsed `<int> <op> <int>` line.
///
/// The operator is kept as its raw token; an unknown token is only
/// reported when the operation is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The line exactly as it appeared on the page.
    pub text: String,
    pub left: i64,
    pub operator: String,
    pub right: i64,
}

/// One page of operations, loaded from a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page identifier (the file name).
    pub id: String,
    /// Operation lines in file order.
    pub lines: Vec<String>,
}

/// How a single operation attempt was scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Correct { answer: i64 },
    Incorrect { answer: i64, given: i64 },
    /// The line could not be parsed or evaluated, so no answer exists.
    Unscorable { error: ReviewError },
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct { .. })
    }
}

/// The result of one operation attempt within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    /// Source operation text.
    pub operation: String,
    pub outcome: Outcome,
    /// Time from session start until the answer was read.
    pub elapsed: Duration,
    /// Whether the answer landed inside the page-level fast window.
    pub fast: bool,
}

/// Aggregate counts for one completed page session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub fast: u32,
    /// Number of operations actually presented.
    pub total: u32,
}

impl SessionSummary {
    /// Fold a sequence of results into a summary.
    pub fn from_results(results: &[OperationResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            if r.outcome.is_correct() {
                acc.correct += 1;
            }
            if r.fast {
                acc.fast += 1;
            }
            acc
        })
    }
}

/// One persisted row of the record log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub page_id: String,
    pub correct: u32,
    pub incorrect: u32,
    pub fast: u32,
    pub date: NaiveDate,
}

impl LogRecord {
    /// Build a record for a page, taking the incorrect count as the
    /// complement of `correct` against `expected_per_page`.
    pub fn from_summary(
        page_id: impl Into<String>,
        summary: &SessionSummary,
        expected_per_page: u32,
        date: NaiveDate,
    ) -> Self {
        Self {
            page_id: page_id.into(),
            correct: summary.correct,
            incorrect: expected_per_page.saturating_sub(summary.correct),
            fast: summary.fast,
            date,
        }
    }
}
