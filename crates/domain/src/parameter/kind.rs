//! Target types of step parameters

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value::Value;

/// The type a step parameter has to be converted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// Any value is accepted as is.
    Any,
    /// Text.
    String,
    /// Integer number.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean flag.
    Boolean,
    /// Raw bytes.
    Bytes,
    /// List with the given element type.
    List(Box<ParameterType>),
    /// Map of values.
    Map,
    /// Optional value of the given type; blank input means "absent".
    Optional(Box<ParameterType>),
    /// Binary-safe wrapper keeping the adapted value untouched.
    DataWrapper,
    /// Composed block of steps; never interpolated.
    SubSteps,
}

impl ParameterType {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates an optional type wrapping the given type.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Returns true for the plain string type.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    /// Checks whether a value can be handed over without conversion.
    ///
    /// Generic parameters are erased: any list satisfies `List(_)`.
    #[must_use]
    pub const fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::String, Value::String(_))
                | (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_))
                | (Self::Boolean, Value::Boolean(_))
                | (Self::Bytes, Value::Bytes(_))
                | (Self::List(_), Value::List(_))
                | (Self::Map, Value::Map(_))
        )
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("object"),
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Bytes => f.write_str("bytes"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Map => f.write_str("map"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::DataWrapper => f.write_str("data"),
            Self::SubSteps => f.write_str("sub-steps"),
        }
    }
}

impl FromStr for ParameterType {
    type Err = DomainError;

    /// Parses descriptions like `string`, `list<int>` or `optional<list<float>>`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        let unknown = || DomainError::UnknownParameterType(input.trim().to_string());

        if let Some((outer, rest)) = normalized.split_once('<') {
            let inner = rest.strip_suffix('>').ok_or_else(unknown)?;
            let inner: Self = inner.parse().map_err(|_| unknown())?;
            return match outer.trim() {
                "list" => Ok(Self::list(inner)),
                "optional" => Ok(Self::optional(inner)),
                _ => Err(unknown()),
            };
        }

        match normalized.as_str() {
            "object" | "any" => Ok(Self::Any),
            "string" | "str" => Ok(Self::String),
            "int" | "integer" | "long" => Ok(Self::Integer),
            "float" | "double" | "number" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Boolean),
            "bytes" | "byte[]" => Ok(Self::Bytes),
            "list" => Ok(Self::list(Self::String)),
            "map" => Ok(Self::Map),
            "data" | "data-wrapper" | "datawrapper" => Ok(Self::DataWrapper),
            "sub-steps" | "substeps" => Ok(Self::SubSteps),
            _ => Err(unknown()),
        }
    }
}
