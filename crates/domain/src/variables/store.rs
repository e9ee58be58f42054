//! Variable scopes with lookup precedence

use std::collections::HashMap;

use super::key::{CompoundKey, VariableKey};
use crate::value::Value;

/// A collection of variables keyed by name.
pub type VariableMap = HashMap<String, Value>;

/// Holds all variable scopes of a test run.
/// Variables are looked up in order of precedence (first match wins):
/// 1. Step scopes (innermost first)
/// 2. Scenario
/// 3. Story
/// 4. Batch
///
/// When no scope knows the key, the default value from `name:default` is used,
/// then the process environment variable with the same key.
#[derive(Debug, Clone)]
pub struct Variables {
    batch: VariableMap,
    story: VariableMap,
    scenario: VariableMap,
    steps: Vec<VariableMap>,
    environment_fallback: bool,
}

impl Variables {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_batch_variables(VariableMap::new())
    }

    /// Creates a store seeded with batch-level variables.
    #[must_use]
    pub fn with_batch_variables(batch: VariableMap) -> Self {
        Self {
            batch,
            story: VariableMap::new(),
            scenario: VariableMap::new(),
            steps: Vec::new(),
            environment_fallback: true,
        }
    }

    /// Enables or disables the process environment fallback.
    #[must_use]
    pub const fn with_environment_fallback(mut self, enabled: bool) -> Self {
        self.environment_fallback = enabled;
        self
    }

    /// Looks up a variable by key.
    #[must_use]
    pub fn get_variable(&self, key: &str) -> Option<Value> {
        let key = VariableKey::parse(key);
        self.scopes()
            .find_map(|scope| lookup(scope, &key))
            .or_else(|| key.default_value.map(Value::from))
            .or_else(|| self.environment_variable(key.key))
    }

    fn environment_variable(&self, key: &str) -> Option<Value> {
        if !self.environment_fallback || key.trim().is_empty() {
            return None;
        }
        std::env::var(key).ok().map(Value::from)
    }

    fn scopes(&self) -> impl Iterator<Item = &VariableMap> {
        self.steps
            .iter()
            .rev()
            .chain([&self.scenario, &self.story, &self.batch])
    }

    /// Returns all visible variables; narrower scopes shadow broader ones.
    #[must_use]
    pub fn variables(&self) -> VariableMap {
        let mut merged = VariableMap::new();
        for scope in [&self.batch, &self.story, &self.scenario]
            .into_iter()
            .chain(self.steps.iter())
        {
            merged.extend(scope.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Stores a variable in the innermost step scope, opening one if needed.
    pub fn put_step_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if self.steps.is_empty() {
            self.init_step_variables();
        }
        if let Some(scope) = self.steps.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    /// Stores a scenario-level variable.
    pub fn put_scenario_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.scenario.insert(key.into(), value.into());
    }

    /// Stores a story-level variable.
    pub fn put_story_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.story.insert(key.into(), value.into());
    }

    /// Stores a batch-level variable.
    pub fn put_batch_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.batch.insert(key.into(), value.into());
    }

    /// Opens a new step scope.
    pub fn init_step_variables(&mut self) {
        self.steps.push(VariableMap::new());
    }

    /// Closes the innermost step scope. Does nothing when no step scope is open.
    pub fn clear_step_variables(&mut self) {
        self.steps.pop();
    }

    /// Drops all scenario-level variables.
    pub fn clear_scenario_variables(&mut self) {
        self.scenario.clear();
    }

    /// Drops all story-level variables.
    pub fn clear_story_variables(&mut self) {
        self.story.clear();
    }
}

impl Default for Variables {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(scope: &VariableMap, key: &VariableKey<'_>) -> Option<Value> {
    scope
        .get(key.key)
        .or_else(|| key.default_value.and_then(|_| scope.get(key.name)))
        .cloned()
        .or_else(|| resolve_compound(key.key, &|name| scope.get(name)))
}

fn resolve_compound<'a>(key: &str, get: &dyn Fn(&str) -> Option<&'a Value>) -> Option<Value> {
    let compound = CompoundKey::parse(key)?;
    let variable = get(compound.name)?;
    let item = match (compound.index, variable) {
        (Some(index), Value::List(items)) => items.get(index)?,
        _ => variable,
    };
    match (compound.field, item) {
        (None, _) => Some(item.clone()),
        (Some(field), Value::Map(entries)) => entries
            .get(field)
            .cloned()
            .or_else(|| resolve_compound(field, &|name| entries.get(name))),
        // Scalars have no fields; the value itself is returned.
        (Some(_), _) => Some(item.clone()),
    }
}
