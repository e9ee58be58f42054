//! Built-in expression processors

mod arguments;
mod string;

pub use arguments::{expect_arguments, parse_arguments};
pub use string::StringExpressionProcessors;
