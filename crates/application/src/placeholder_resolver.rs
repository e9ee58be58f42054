//! Placeholder resolver
//!
//! Alternates variable substitution and expression processing until the
//! value stops changing.

use vividus_domain::{ParameterType, Value, Variables};

use crate::error::ApplicationResult;
use crate::expression::ExpressionAdaptor;
use crate::ports::VariableContext;
use crate::variable_resolver::VariableResolver;

/// Maximum number of resolution cycles before falling back to one cycle
/// over the original input.
pub const MAX_DEPTH: usize = 16;

/// Resolves `${...}` placeholders and `#{...}` expressions to a fixed point.
#[derive(Debug)]
pub struct PlaceholderResolver<C = Variables> {
    variable_resolver: VariableResolver<C>,
    expression_adaptor: ExpressionAdaptor,
}

impl<C: VariableContext> PlaceholderResolver<C> {
    /// Creates a resolver from its two stages.
    #[must_use]
    pub const fn new(
        variable_resolver: VariableResolver<C>,
        expression_adaptor: ExpressionAdaptor,
    ) -> Self {
        Self {
            variable_resolver,
            expression_adaptor,
        }
    }

    /// Returns the variable resolver.
    #[must_use]
    pub const fn variable_resolver(&self) -> &VariableResolver<C> {
        &self.variable_resolver
    }

    /// Returns the variable resolver mutably, e.g. to update variables.
    pub const fn variable_resolver_mut(&mut self) -> &mut VariableResolver<C> {
        &mut self.variable_resolver
    }

    /// Returns the expression adaptor.
    #[must_use]
    pub const fn expression_adaptor(&self) -> &ExpressionAdaptor {
        &self.expression_adaptor
    }

    /// Resolves the value for the given target type.
    ///
    /// Each cycle substitutes variables, then processes expressions when the
    /// target is a string or the substituted value is text. Cycles repeat
    /// while they produce new text. If the value still changes after
    /// [`MAX_DEPTH`] cycles, the result of a single cycle over the original
    /// input is returned.
    ///
    /// # Errors
    /// Returns an error if an expression fails.
    pub fn resolve_placeholders(
        &self,
        value: &str,
        target: &ParameterType,
    ) -> ApplicationResult<Option<Value>> {
        let mut current = value.to_string();

        for _ in 0..MAX_DEPTH {
            match self.resolve_cycle(&current, target)? {
                Some(Value::String(next)) if next != current => current = next,
                adapted => return Ok(adapted),
            }
        }

        self.resolve_cycle(value, target)
    }

    fn resolve_cycle(
        &self,
        value: &str,
        target: &ParameterType,
    ) -> ApplicationResult<Option<Value>> {
        let resolved = self.variable_resolver.resolve(value);
        if !target.is_string() && !resolved.is_string() {
            return Ok(Some(resolved));
        }
        let text = resolved.into_string();
        Ok(self.expression_adaptor.process_raw_expression(&text)?)
    }
}
