//! Domain error types.
//!
//! Parse and evaluation errors are local to a single operation and end up
//! inside an `Outcome::Unscorable`. Session errors abort the whole run.

use thiserror::Error;

/// Errors produced while splitting an operation line into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has fewer than three space-separated tokens.
    #[error("expected `<int> <op> <int>`, found {found} token(s)")]
    TooFewTokens { found: usize },

    /// An operand is not a base-10 integer.
    #[error("invalid operand: '{token}'")]
    InvalidOperand { token: String },
}

/// Errors produced while computing the correct answer of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    /// The operator token is not one of `+`, `-`, `x`, `/`.
    #[error("unknown operator: '{token}'")]
    UnknownOperator { token: String },

    #[error("arithmetic overflow")]
    Overflow,
}

/// Why an operation could not be reviewed against an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Fatal errors raised while running a session against the console.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input ended before the session finished.
    #[error("input closed before the session finished")]
    InputClosed,

    /// The user typed something that is not an integer answer.
    #[error("error reading the input: '{input}' is not an integer")]
    InvalidAnswer { input: String },

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
