//! Expression adaptor
//!
//! Evaluates every `#{...}` expression in a string through an ordered list
//! of processors.

use std::borrow::Cow;
use std::fmt;

use tracing::error;
use vividus_domain::{NULL_EXPRESSION, Value};

use super::parser::{EXPRESSION_START, find_expression};
use crate::ports::{ExpressionError, ExpressionProcessor};

/// Boxed expression processor.
pub type BoxedExpressionProcessor = Box<dyn ExpressionProcessor>;

/// Evaluates `#{...}` expressions with the first processor that supports
/// them.
///
/// Unsupported expressions are left in the text verbatim. When the input is
/// exactly one supported expression its result keeps its native type.
#[derive(Default)]
pub struct ExpressionAdaptor {
    processors: Vec<BoxedExpressionProcessor>,
    dry_run: bool,
}

impl ExpressionAdaptor {
    /// Creates an adaptor over the processors, tried in order.
    #[must_use]
    pub fn new(processors: Vec<BoxedExpressionProcessor>) -> Self {
        Self {
            processors,
            dry_run: false,
        }
    }

    /// Creates an adaptor without processors.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Appends a processor with the lowest priority.
    pub fn add_processor(&mut self, processor: BoxedExpressionProcessor) {
        self.processors.push(processor);
    }

    /// Returns the number of registered processors.
    #[must_use]
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Processes every expression in the input.
    ///
    /// Returns `Ok(None)` for the literal `#{null}`. In dry-run mode the
    /// input is returned untouched.
    ///
    /// # Errors
    /// Returns the first processor error. The failing input is logged.
    pub fn process_raw_expression(&self, value: &str) -> Result<Option<Value>, ExpressionError> {
        if self.dry_run {
            return Ok(Some(Value::from(value)));
        }
        if value == NULL_EXPRESSION {
            return Ok(None);
        }
        self.process(value, true)
            .map(Some)
            .inspect_err(|_| error!("Unable to process expression '{value}'"))
    }

    /// Evaluates a single expression body.
    ///
    /// Returns `Ok(None)` if no processor supports it.
    ///
    /// # Errors
    /// Returns the processor error.
    pub fn process_expression(&self, expression: &str) -> Result<Option<Value>, ExpressionError> {
        for processor in &self.processors {
            if let Some(value) = processor.execute(expression)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn process(&self, input: &str, top_level: bool) -> Result<Value, ExpressionError> {
        let mut output = String::with_capacity(input.len());
        let mut position = 0;

        while let Some(expression) = find_expression(input, position) {
            output.push_str(&input[position..expression.span.start]);

            let body = expression.body(input);
            let body = if body.contains(EXPRESSION_START) {
                Cow::Owned(self.process(body, false)?.into_string())
            } else {
                Cow::Borrowed(body)
            };

            match self.process_expression(&body)? {
                Some(value) if top_level && expression.span == (0..input.len()) => {
                    return Ok(value);
                }
                Some(value) => output.push_str(&value.into_string()),
                None => {
                    output.push_str(EXPRESSION_START);
                    output.push_str(&body);
                    output.push('}');
                }
            }
            position = expression.span.end;
        }

        output.push_str(&input[position..]);
        Ok(Value::String(output))
    }
}

impl fmt::Debug for ExpressionAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionAdaptor")
            .field("processors", &self.processors.len())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
