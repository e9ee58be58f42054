//! Application error types

use thiserror::Error;
use vividus_domain::DomainError;

use crate::ports::{ConversionError, ExpressionError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An expression could not be processed.
    #[error("expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// A resolved value could not be converted to the requested type.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
