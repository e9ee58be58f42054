//! Variable resolution module
//!
//! Provides parsing and resolution of `${variable}` placeholders.
//!
//! # Usage
//!
//! ```
//! use vividus_application::variable_resolver::{DynamicVariableRegistry, VariableResolver};
//! use vividus_domain::{Value, VariableMap};
//!
//! let mut variables = VariableMap::new();
//! variables.insert("host".to_string(), Value::from("localhost"));
//! variables.insert("port".to_string(), Value::from(8080));
//!
//! let resolver = VariableResolver::new(variables, DynamicVariableRegistry::empty());
//!
//! assert_eq!(resolver.resolve("http://${host}:${port}/api"), Value::from("http://localhost:8080/api"));
//! assert_eq!(resolver.resolve("${port}"), Value::Integer(8080));
//! ```

pub mod dynamic;
pub mod engine;
pub mod parser;

pub use dynamic::{DynamicVariableRegistry, SharedDynamicVariable, to_camel_case};
pub use engine::VariableResolver;
pub use parser::{
    PLACEHOLDER_START, PlaceholderSpan, extract_variable_names, find_placeholder,
    has_placeholders, parse_placeholders,
};
