//! Resolving front-end of the converter chain

use tracing::debug;
use vividus_domain::{ConvertedParameter, DataWrapper, ParameterType, Value, Variables};

use super::ParameterConverters;
use crate::error::ApplicationResult;
use crate::placeholder_resolver::PlaceholderResolver;
use crate::ports::{ConversionError, VariableContext};

/// Resolves placeholders and expressions in step parameters, then converts
/// the result to the requested type.
#[derive(Debug)]
pub struct ParameterConvertersDecorator<C = Variables> {
    placeholder_resolver: PlaceholderResolver<C>,
    converters: ParameterConverters,
}

impl<C: VariableContext> ParameterConvertersDecorator<C> {
    /// Creates a decorator over the resolver and converter chain.
    #[must_use]
    pub const fn new(
        placeholder_resolver: PlaceholderResolver<C>,
        converters: ParameterConverters,
    ) -> Self {
        Self {
            placeholder_resolver,
            converters,
        }
    }

    /// Returns the placeholder resolver.
    #[must_use]
    pub const fn placeholder_resolver(&self) -> &PlaceholderResolver<C> {
        &self.placeholder_resolver
    }

    /// Returns the placeholder resolver mutably.
    pub const fn placeholder_resolver_mut(&mut self) -> &mut PlaceholderResolver<C> {
        &mut self.placeholder_resolver
    }

    /// Returns the converter chain mutably, e.g. to register converters.
    pub const fn converters_mut(&mut self) -> &mut ParameterConverters {
        &mut self.converters
    }

    /// Converts a raw step parameter to the target type.
    ///
    /// Sub-steps are converted without resolution. Absent input, and input
    /// whose expressions yield null, convert to `None`.
    ///
    /// # Errors
    /// Returns an error if an expression fails or the resolved value cannot
    /// be converted.
    pub fn convert(
        &self,
        value: Option<&str>,
        target: &ParameterType,
    ) -> ApplicationResult<Option<ConvertedParameter>> {
        if *target == ParameterType::SubSteps {
            return Ok(value
                .map(|steps| self.converters.convert(steps, target))
                .transpose()?);
        }
        let Some(value) = value else {
            return Ok(None);
        };
        let Some(adapted) = self.placeholder_resolver.resolve_placeholders(value, target)? else {
            debug!(target_type = %target, "parameter resolved to null");
            return Ok(None);
        };

        Ok(Some(self.convert_resolved(adapted, target)?))
    }

    fn convert_resolved(
        &self,
        adapted: Value,
        target: &ParameterType,
    ) -> Result<ConvertedParameter, ConversionError> {
        match target {
            ParameterType::DataWrapper => Ok(ConvertedParameter::Data(DataWrapper::new(adapted))),
            ParameterType::Optional(_) if adapted.is_blank_string() => {
                Ok(ConvertedParameter::Optional(None))
            }
            ParameterType::Optional(inner) => {
                let converted = self.convert_resolved(adapted, inner)?;
                Ok(ConvertedParameter::Optional(Some(Box::new(converted))))
            }
            _ => self.convert_adapted(adapted, target),
        }
    }

    fn convert_adapted(
        &self,
        adapted: Value,
        target: &ParameterType,
    ) -> Result<ConvertedParameter, ConversionError> {
        match adapted {
            Value::String(text) if *target != ParameterType::Any => {
                self.converters.convert(&text, target)
            }
            value if target.accepts(&value) => Ok(value.into()),
            value => self.converters.convert(&value.into_string(), target),
        }
    }
}
