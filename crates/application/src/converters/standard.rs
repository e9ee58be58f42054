//! Built-in converters

use vividus_domain::{ConvertedParameter, ParameterType, SubSteps, Value};

use super::ParameterConverters;
use crate::ports::{ConversionError, ParameterConverter};

fn invalid(value: &str, target: &ParameterType, reason: impl ToString) -> ConversionError {
    ConversionError::InvalidValue {
        value: value.to_string(),
        target: target.clone(),
        reason: reason.to_string(),
    }
}

/// Text, with line endings normalized to `\n`. Also serves untyped targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl ParameterConverter for StringConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        matches!(target, ParameterType::String | ParameterType::Any)
    }

    fn convert(
        &self,
        value: &str,
        _target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
        Ok(Value::String(normalized).into())
    }
}

/// Integer and floating point numbers; surrounding whitespace is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConverter;

impl ParameterConverter for NumberConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        matches!(target, ParameterType::Integer | ParameterType::Float)
    }

    fn convert(
        &self,
        value: &str,
        target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        let trimmed = value.trim();
        let number = if *target == ParameterType::Integer {
            trimmed
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| invalid(value, target, e))?
        } else {
            trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid(value, target, e))?
        };
        Ok(number.into())
    }
}

/// `true` or `false`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl ParameterConverter for BooleanConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        *target == ParameterType::Boolean
    }

    fn convert(
        &self,
        value: &str,
        target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        let flag = match value.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(invalid(value, target, "expected 'true' or 'false'")),
        };
        Ok(Value::Boolean(flag).into())
    }
}

/// UTF-8 bytes of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesConverter;

impl ParameterConverter for BytesConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        *target == ParameterType::Bytes
    }

    fn convert(
        &self,
        value: &str,
        _target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        Ok(Value::Bytes(value.as_bytes().to_vec()).into())
    }
}

/// Comma-separated list; each trimmed element is converted through the
/// chain. Blank input is an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListConverter;

impl ParameterConverter for ListConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        matches!(target, ParameterType::List(_))
    }

    fn convert(
        &self,
        value: &str,
        target: &ParameterType,
        converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        let ParameterType::List(element) = target else {
            return Err(ConversionError::NoConverter(target.clone()));
        };
        if value.trim().is_empty() {
            return Ok(Value::List(Vec::new()).into());
        }

        let items = value
            .split(',')
            .map(|item| {
                converters
                    .convert(item.trim(), element)?
                    .into_value()
                    .ok_or_else(|| invalid(item, target, "element is not a plain value"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::List(items).into())
    }
}

/// Composed steps, one per non-blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubStepsConverter;

impl ParameterConverter for SubStepsConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        *target == ParameterType::SubSteps
    }

    fn convert(
        &self,
        value: &str,
        _target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        Ok(ConvertedParameter::SubSteps(SubSteps::parse(value)))
    }
}
