//! Dynamic variable registry
//!
//! Dynamic variables are registered under hyphenated names such as
//! `current-date`. Every such name is also reachable in camelCase
//! (`currentDate`).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ports::DynamicVariable;

/// Shared handle to a dynamic variable.
pub type SharedDynamicVariable = Arc<dyn DynamicVariable>;

/// Name-indexed collection of dynamic variables.
#[derive(Clone, Default)]
pub struct DynamicVariableRegistry {
    variables: HashMap<String, SharedDynamicVariable>,
}

impl DynamicVariableRegistry {
    /// Creates a registry from named variables, adding camelCase aliases.
    ///
    /// An alias never shadows a variable registered under the same name.
    #[must_use]
    pub fn new(variables: impl IntoIterator<Item = (String, SharedDynamicVariable)>) -> Self {
        let variables: HashMap<_, _> = variables.into_iter().collect();
        let aliases: Vec<_> = variables
            .iter()
            .filter(|(name, _)| name.contains('-'))
            .map(|(name, variable)| (to_camel_case(name), Arc::clone(variable)))
            .collect();

        let mut registry = Self { variables };
        for (alias, variable) in aliases {
            registry.variables.entry(alias).or_insert(variable);
        }
        registry
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a variable under its name and camelCase alias.
    pub fn register(&mut self, name: impl Into<String>, variable: SharedDynamicVariable) {
        let name = name.into();
        if name.contains('-') {
            self.variables
                .entry(to_camel_case(&name))
                .or_insert_with(|| Arc::clone(&variable));
        }
        self.variables.insert(name, variable);
    }

    /// Looks up a variable by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn DynamicVariable> {
        self.variables.get(name).map(|variable| &**variable)
    }

    /// Returns true if a variable is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Returns all registered names, aliases included, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl fmt::Debug for DynamicVariableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicVariableRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Converts a hyphenated name to lower camelCase.
///
/// Every segment is lower-cased; segments after the first are capitalized.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for (index, segment) in name.split('-').filter(|s| !s.is_empty()).enumerate() {
        let lower = segment.to_lowercase();
        if index == 0 {
            result.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::DynamicVariableResult;
    use pretty_assertions::assert_eq;
    use vividus_domain::Value;

    fn constant(value: &'static str) -> SharedDynamicVariable {
        Arc::new(move || -> DynamicVariableResult { Ok(Value::from(value)) })
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(to_camel_case("dynamic-variable-key"), "dynamicVariableKey");
        assert_eq!(to_camel_case("current-date"), "currentDate");
        assert_eq!(to_camel_case("random-UUID"), "randomUuid");
        assert_eq!(to_camel_case("plain"), "plain");
        assert_eq!(to_camel_case("double--dash"), "doubleDash");
    }

    #[test]
    fn test_registry_adds_camel_case_alias() {
        let registry = DynamicVariableRegistry::new([(
            "dynamic-variable-key".to_string(),
            constant("value"),
        )]);

        assert!(registry.contains("dynamic-variable-key"));
        assert!(registry.contains("dynamicVariableKey"));
        assert_eq!(registry.len(), 2);

        let value = registry
            .get("dynamicVariableKey")
            .expect("alias registered")
            .calculate_value()
            .unwrap();
        assert_eq!(value, Value::from("value"));
    }

    #[test]
    fn test_alias_does_not_shadow_explicit_name() {
        let registry = DynamicVariableRegistry::new([
            ("some-name".to_string(), constant("hyphenated")),
            ("someName".to_string(), constant("explicit")),
        ]);

        let value = registry.get("someName").unwrap().calculate_value().unwrap();
        assert_eq!(value, Value::from("explicit"));
    }

    #[test]
    fn test_register_after_creation() {
        let mut registry = DynamicVariableRegistry::empty();
        assert!(registry.is_empty());

        registry.register("current-date", constant("today"));
        assert_eq!(registry.names(), vec!["current-date", "currentDate"]);
    }

    #[test]
    fn test_unknown_name() {
        let registry = DynamicVariableRegistry::empty();
        assert!(registry.get("missing").is_none());
    }
}
