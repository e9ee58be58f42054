//! Expression processing
//!
//! Finds `#{...}` expressions and evaluates them through registered
//! [`ExpressionProcessor`](crate::ports::ExpressionProcessor)s.

pub mod adaptor;
pub mod parser;

pub use adaptor::{BoxedExpressionProcessor, ExpressionAdaptor};
pub use parser::{EXPRESSION_START, ExpressionSpan, find_expression};
