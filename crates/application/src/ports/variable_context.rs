//! Variable store port

use vividus_domain::{Value, VariableMap, Variables};

/// Read access to the variables of the running test.
///
/// The store is owned by the test execution; resolvers only query it.
pub trait VariableContext {
    /// Returns the value stored under the exact key, if any.
    fn get_variable(&self, key: &str) -> Option<Value>;
}

impl VariableContext for Variables {
    fn get_variable(&self, key: &str) -> Option<Value> {
        Self::get_variable(self, key)
    }
}

impl VariableContext for VariableMap {
    fn get_variable(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl<C: VariableContext + ?Sized> VariableContext for &C {
    fn get_variable(&self, key: &str) -> Option<Value> {
        (**self).get_variable(key)
    }
}
