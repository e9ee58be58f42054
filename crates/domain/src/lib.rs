//! VIVIDUS Domain - Core step parameter types
//!
//! This crate defines the values, parameter types and variable scopes used by
//! the step parameter resolver.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod parameter;
pub mod value;
pub mod variables;

pub use error::{DomainError, DomainResult};
pub use parameter::{ConvertedParameter, DataWrapper, ParameterType, SubSteps};
pub use value::Value;
pub use variables::{NULL_EXPRESSION, VariableMap, Variables};
