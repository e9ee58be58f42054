//! Expression processor port

use thiserror::Error;
use vividus_domain::Value;

/// Errors raised while evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The expression was called with unexpected arguments.
    #[error("{0}")]
    InvalidArguments(String),

    /// The expression was recognized but its evaluation failed.
    #[error("unable to evaluate '{expression}': {reason}")]
    Evaluation {
        /// The expression body.
        expression: String,
        /// What went wrong.
        reason: String,
    },
}

/// Result of an expression evaluation.
///
/// `Ok(None)` means the processor does not support the expression.
pub type ExpressionResult = Result<Option<Value>, ExpressionError>;

/// Evaluates the body of a `#{...}` expression.
pub trait ExpressionProcessor: Send + Sync {
    /// Evaluates the expression if supported.
    ///
    /// # Errors
    /// Returns an error if the expression is supported but cannot be evaluated.
    fn execute(&self, expression: &str) -> ExpressionResult;
}

impl<F> ExpressionProcessor for F
where
    F: Fn(&str) -> ExpressionResult + Send + Sync,
{
    fn execute(&self, expression: &str) -> ExpressionResult {
        self(expression)
    }
}
