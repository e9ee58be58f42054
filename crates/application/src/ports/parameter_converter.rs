//! Parameter converter port

use thiserror::Error;
use vividus_domain::{ConvertedParameter, ParameterType};

use crate::converters::ParameterConverters;

/// Errors that can occur while converting a string to a parameter type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No registered converter handles the type.
    #[error("no converter found for type {0}")]
    NoConverter(ParameterType),

    /// The value is not valid for the type.
    #[error("unable to convert '{value}' to {target}: {reason}")]
    InvalidValue {
        /// The string value.
        value: String,
        /// The requested type.
        target: ParameterType,
        /// Why the conversion failed.
        reason: String,
    },
}

/// Converts string parameters to one or more parameter types.
pub trait ParameterConverter: Send + Sync {
    /// Returns true if this converter handles the type.
    fn accepts(&self, target: &ParameterType) -> bool;

    /// Converts the value. `converters` is the full chain, for element types.
    ///
    /// # Errors
    /// Returns an error if the value is not valid for the type.
    fn convert(
        &self,
        value: &str,
        target: &ParameterType,
        converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError>;
}
