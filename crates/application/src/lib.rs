//! VIVIDUS Application - Step parameter resolution
//!
//! This crate defines the resolution pipeline with:
//! - Port traits (variable context, dynamic variables, expression processors,
//!   parameter converters)
//! - Variable placeholder resolution
//! - Expression processing
//! - Resolution to a fixed point and type conversion
//! - Application-level error handling

pub mod converters;
pub mod error;
pub mod expression;
pub mod placeholder_resolver;
pub mod ports;
pub mod variable_resolver;

#[cfg(test)]
mod test_support;

pub use converters::{BoxedParameterConverter, ParameterConverters, ParameterConvertersDecorator};
pub use error::{ApplicationError, ApplicationResult};
pub use expression::{BoxedExpressionProcessor, ExpressionAdaptor};
pub use placeholder_resolver::{MAX_DEPTH, PlaceholderResolver};
pub use ports::{
    ConversionError, DynamicVariable, DynamicVariableError, DynamicVariableResult, ExpressionError,
    ExpressionProcessor, ExpressionResult, ParameterConverter, VariableContext,
};
pub use variable_resolver::{DynamicVariableRegistry, SharedDynamicVariable, VariableResolver};
