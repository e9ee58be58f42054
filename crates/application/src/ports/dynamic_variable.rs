//! Dynamic variable port
//!
//! Dynamic variables are computed on demand instead of being stored.

use thiserror::Error;
use vividus_domain::Value;

/// A dynamic variable could not produce its value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DynamicVariableError(String);

impl DynamicVariableError {
    /// Creates an error with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Returns the error description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Outcome of a dynamic variable calculation.
pub type DynamicVariableResult = Result<Value, DynamicVariableError>;

/// A lazily computed variable value.
pub trait DynamicVariable: Send + Sync {
    /// Computes the current value. Failures are reported, never panicked.
    fn calculate_value(&self) -> DynamicVariableResult;
}

impl<F> DynamicVariable for F
where
    F: Fn() -> DynamicVariableResult + Send + Sync,
{
    fn calculate_value(&self) -> DynamicVariableResult {
        self()
    }
}
