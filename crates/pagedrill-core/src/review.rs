//! Reviewing a user's answer against an operation line.

use crate::error::ReviewError;
use crate::parser::parse_operation;

/// The verdict for one answered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Review {
    /// Whether the user's answer matched.
    pub correct: bool,
    /// The correct answer.
    pub answer: i64,
}

/// Parse and evaluate `operation`, then compare the result to `user_answer`.
///
/// A malformed line or an operation with no defined result is an error,
/// never a wrong answer with a placeholder value.
pub fn review_operation(operation: &str, user_answer: i64) -> Result<Review, ReviewError> {
    let parsed = parse_operation(operation)?;
    let answer = parsed.evaluate()?;

    Ok(Review {
        correct: user_answer == answer,
        answer,
    })
}
