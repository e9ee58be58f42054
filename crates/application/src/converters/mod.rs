//! Parameter conversion
//!
//! [`ParameterConverters`] is an ordered chain of
//! [`ParameterConverter`]s; the first one accepting the target type
//! converts the value. [`ParameterConvertersDecorator`] resolves
//! placeholders and expressions before handing values to the chain.

mod decorator;
mod standard;

use std::fmt;

use tracing::trace;
use vividus_domain::{ConvertedParameter, ParameterType};

use crate::ports::{ConversionError, ParameterConverter};

pub use decorator::ParameterConvertersDecorator;
pub use standard::{
    BooleanConverter, BytesConverter, ListConverter, NumberConverter, StringConverter,
    SubStepsConverter,
};

/// Boxed parameter converter.
pub type BoxedParameterConverter = Box<dyn ParameterConverter>;

/// Ordered chain of converters.
#[derive(Default)]
pub struct ParameterConverters {
    converters: Vec<BoxedParameterConverter>,
}

impl ParameterConverters {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain with converters for every built-in parameter type.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            converters: vec![
                Box::new(StringConverter),
                Box::new(NumberConverter),
                Box::new(BooleanConverter),
                Box::new(BytesConverter),
                Box::new(ListConverter),
                Box::new(SubStepsConverter),
            ],
        }
    }

    /// Adds a converter ahead of the existing ones.
    pub fn add_converter(&mut self, converter: BoxedParameterConverter) {
        self.converters.insert(0, converter);
    }

    /// Returns the number of converters in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns true if the chain has no converters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Converts the value with the first converter accepting the type.
    ///
    /// # Errors
    /// Returns [`ConversionError::NoConverter`] if no converter accepts the
    /// type, or the converter's own error.
    pub fn convert(
        &self,
        value: &str,
        target: &ParameterType,
    ) -> Result<ConvertedParameter, ConversionError> {
        let converter = self
            .converters
            .iter()
            .find(|converter| converter.accepts(target))
            .ok_or_else(|| ConversionError::NoConverter(target.clone()))?;
        trace!(target_type = %target, "converting parameter");
        converter.convert(value, target, self)
    }
}

impl fmt::Debug for ParameterConverters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterConverters")
            .field("converters", &self.converters.len())
            .finish()
    }
}
