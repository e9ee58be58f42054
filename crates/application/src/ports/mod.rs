//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the resolution engine and the
//! surrounding test framework. Each port is a trait implemented by the
//! framework or by the infrastructure layer.

mod dynamic_variable;
mod expression_processor;
mod parameter_converter;
mod variable_context;

pub use dynamic_variable::{DynamicVariable, DynamicVariableError, DynamicVariableResult};
pub use expression_processor::{ExpressionError, ExpressionProcessor, ExpressionResult};
pub use parameter_converter::{ConversionError, ParameterConverter};
pub use variable_context::VariableContext;
