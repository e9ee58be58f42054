//! VIVIDUS Infrastructure - Built-in implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, settings loading and
//! assembly of the resolution pipeline.

pub mod config;
pub mod dynamic_variables;
pub mod expressions;
pub mod pipeline;

pub use config::{ConfigError, ResolverSettings, yaml_to_value};
pub use dynamic_variables::{BuiltinInfo, BuiltinVariable, builtin_registry};
pub use expressions::StringExpressionProcessors;
pub use pipeline::{build_decorator, build_from_settings, builtin_expression_processors};
