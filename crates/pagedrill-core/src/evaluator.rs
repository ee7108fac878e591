//! Arithmetic evaluation of parsed operations.

use crate::error::EvalError;
use crate::model::{Operation, Operator};

/// Compute `left <operator> right`.
///
/// Division truncates toward zero. Overflow is reported rather than wrapped.
pub fn evaluate(left: i64, operator: Operator, right: i64) -> Result<i64, EvalError> {
    let value = match operator {
        Operator::Add => left.checked_add(right),
        Operator::Subtract => left.checked_sub(right),
        Operator::Multiply => left.checked_mul(right),
        Operator::Divide => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            left.checked_div(right)
        }
    };
    value.ok_or(EvalError::Overflow)
}

impl Operation {
    /// Resolve the operator token and compute the correct answer.
    pub fn evaluate(&self) -> Result<i64, EvalError> {
        let operator: Operator = self.operator.parse()?;
        evaluate(self.left, operator, self.right)
    }
}
