//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while working with step parameter values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wrapped value cannot be represented as bytes.
    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    /// A textual parameter type description could not be parsed.
    #[error("unknown parameter type: {0}")]
    UnknownParameterType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
