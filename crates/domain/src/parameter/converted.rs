//! Results of step parameter conversion

use std::borrow::Cow;

use crate::error::{DomainError, DomainResult};
use crate::value::Value;

/// A step parameter after resolution and type conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedParameter {
    /// A plain value.
    Value(Value),
    /// An optional parameter; `None` when the resolved input was blank.
    Optional(Option<Box<ConvertedParameter>>),
    /// A binary-safe wrapper around the adapted value.
    Data(DataWrapper),
    /// A block of composed steps.
    SubSteps(SubSteps),
}

impl ConvertedParameter {
    /// Returns the plain value, if this is one.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the parameter and returns the plain value, if this is one.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for ConvertedParameter {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Keeps a raw string or byte payload for binary-safe steps (e.g. mock bodies).
#[derive(Debug, Clone, PartialEq)]
pub struct DataWrapper {
    data: Value,
}

impl DataWrapper {
    /// Wraps the given value.
    #[must_use]
    pub const fn new(data: Value) -> Self {
        Self { data }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.data
    }

    /// Returns the payload as bytes: UTF-8 for strings, raw for byte arrays.
    ///
    /// # Errors
    /// Returns [`DomainError::UnsupportedDataType`] for any other value type.
    pub fn bytes(&self) -> DomainResult<Cow<'_, [u8]>> {
        match &self.data {
            Value::String(text) => Ok(Cow::Borrowed(text.as_bytes())),
            Value::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            other => Err(DomainError::UnsupportedDataType(other.type_name().to_string())),
        }
    }
}

/// Steps composed inside another step; kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubSteps {
    steps: Vec<String>,
}

impl SubSteps {
    /// Splits a step block into its non-blank lines.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let steps = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { steps }
    }

    /// Returns the steps in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the block has no steps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_wrapper_string_bytes() {
        let wrapper = DataWrapper::new(Value::from("body"));
        assert_eq!(&*wrapper.bytes().unwrap(), b"body");
    }

    #[test]
    fn test_data_wrapper_raw_bytes() {
        let wrapper = DataWrapper::new(Value::from(vec![0_u8, 1, 2]));
        assert_eq!(&*wrapper.bytes().unwrap(), &[0_u8, 1, 2]);
    }

    #[test]
    fn test_data_wrapper_unsupported_type() {
        let wrapper = DataWrapper::new(Value::from(42));
        let error = wrapper.bytes().unwrap_err();
        assert_eq!(error, DomainError::UnsupportedDataType("integer".to_string()));
        assert_eq!(error.to_string(), "Unsupported data type: integer");
    }

    #[test]
    fn test_sub_steps_parse() {
        let steps = SubSteps::parse("When I do one thing\n\n   Then I check it  \n");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.steps(), ["When I do one thing", "Then I check it"]);
    }

    #[test]
    fn test_converted_parameter_value_accessors() {
        let converted = ConvertedParameter::from(Value::from(3));
        assert_eq!(converted.as_value(), Some(&Value::from(3)));
        assert_eq!(converted.into_value(), Some(Value::from(3)));
        assert_eq!(ConvertedParameter::Optional(None).into_value(), None);
    }
}
