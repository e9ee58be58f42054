//! Scoped variable storage
//!
//! Variables live in nested scopes: steps (a stack), scenario, story and
//! batch. Narrower scopes shadow broader ones.

mod key;
mod store;

pub use store::{VariableMap, Variables};

/// Expression resolving to "no value" instead of a string.
pub const NULL_EXPRESSION: &str = "#{null}";
