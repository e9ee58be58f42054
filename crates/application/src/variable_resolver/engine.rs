//! Variable resolution engine
//!
//! Substitutes `${key}` placeholders with values from the variable context
//! or from dynamic variables.

use tracing::{error, trace};
use vividus_domain::{Value, Variables};

use super::dynamic::DynamicVariableRegistry;
use super::parser::{self, PLACEHOLDER_START, find_placeholder};
use crate::ports::VariableContext;

/// The variable resolution engine.
///
/// Lookup order for a key: the variable context first, then dynamic
/// variables. Dynamic variables are never calculated in dry-run mode.
#[derive(Debug)]
pub struct VariableResolver<C = Variables> {
    context: C,
    dynamic_variables: DynamicVariableRegistry,
    dry_run: bool,
}

impl<C: VariableContext> VariableResolver<C> {
    /// Creates a new resolver over the given context.
    #[must_use]
    pub const fn new(context: C, dynamic_variables: DynamicVariableRegistry) -> Self {
        Self {
            context,
            dynamic_variables,
            dry_run: false,
        }
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns true if dynamic variables are skipped.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns a reference to the variable context.
    #[must_use]
    pub const fn context(&self) -> &C {
        &self.context
    }

    /// Returns a mutable reference to the variable context.
    pub const fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Returns the registered dynamic variables.
    #[must_use]
    pub const fn dynamic_variables(&self) -> &DynamicVariableRegistry {
        &self.dynamic_variables
    }

    /// Resolves all placeholders in the input.
    ///
    /// When the input is exactly one placeholder (line breaks around it are
    /// ignored) and it resolves, the value is returned as-is, whatever its
    /// type. Otherwise values are stringified into the text. Unresolved
    /// placeholders stay in place, with any nested placeholders in their key
    /// already substituted.
    pub fn resolve(&self, value: &str) -> Value {
        let mut result = value.to_string();
        let mut position = 0;
        let mut substituted = false;

        while let Some(placeholder) = find_placeholder(&result, position) {
            let raw_key = placeholder.key(&result);
            let key = if raw_key.contains(PLACEHOLDER_START) {
                self.resolve(raw_key).into_string()
            } else {
                raw_key.to_string()
            };

            let replacement = match self.lookup(&key) {
                Some(resolved) if !substituted && placeholder.is_whole_input(&result) => {
                    return resolved;
                }
                Some(resolved) => resolved.into_string(),
                None => {
                    trace!(key = %key, "variable not found");
                    format!("${{{key}}}")
                }
            };

            result.replace_range(placeholder.span.clone(), &replacement);
            position = placeholder.span.start + replacement.len();
            substituted = true;
        }

        Value::String(result)
    }

    /// Returns the keys of placeholders left after resolving the input.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        match self.resolve(input) {
            Value::String(resolved) => parser::extract_variable_names(&resolved),
            _ => Vec::new(),
        }
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        if key.is_empty() {
            return None;
        }
        self.context
            .get_variable(key)
            .or_else(|| self.calculate_dynamic_variable(key))
    }

    fn calculate_dynamic_variable(&self, key: &str) -> Option<Value> {
        if self.dry_run {
            return None;
        }
        let variable = self.dynamic_variables.get(key)?;
        match variable.calculate_value() {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Unable to resolve dynamic variable ${{{key}}}: {e}");
                None
            }
        }
    }
}

impl Default for VariableResolver {
    fn default() -> Self {
        Self::new(Variables::new(), DynamicVariableRegistry::empty())
    }
}
