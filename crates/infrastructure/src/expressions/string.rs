//! String expression processors
//!
//! Expressions have the form `name(arguments)`. Names are case-insensitive
//! and arguments may span several lines.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;
use tracing::debug;
use vividus_application::ports::{ExpressionError, ExpressionProcessor, ExpressionResult};
use vividus_domain::Value;

use super::arguments::{expect_arguments, parse_arguments};

#[allow(clippy::expect_used)]
static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\w+)\((.*)\)$").expect("expression call pattern is valid")
});

type Evaluate = fn(&str, &str) -> Result<Value, ExpressionError>;

const EXPRESSIONS: &[(&str, Evaluate)] = &[
    ("trim", |_, input| Ok(text(input.trim()))),
    ("toLowerCase", |_, input| Ok(text(&input.to_lowercase()))),
    ("toUpperCase", |_, input| Ok(text(&input.to_uppercase()))),
    ("capitalizeFirstWord", |_, input| Ok(text(&capitalize(input)))),
    ("capitalizeWords", |_, input| Ok(text(&map_words(input, capitalize)))),
    ("capitalizeWordsFully", |_, input| {
        Ok(text(&map_words(&input.to_lowercase(), capitalize)))
    }),
    ("uncapitalizeFirstWord", |_, input| Ok(text(&uncapitalize(input)))),
    ("uncapitalizeWords", |_, input| Ok(text(&map_words(input, uncapitalize)))),
    ("escapeHTML", |_, input| Ok(text(&escape_html(input)))),
    ("escapeJSON", |_, input| Ok(text(&escape_json(input)))),
    ("quoteRegExp", |_, input| Ok(text(&quote_regex(input)))),
    ("substringBefore", substring_before),
    ("substringAfter", substring_after),
    ("anyOf", any_of),
    ("encodeToBase64", |_, input| Ok(text(&STANDARD.encode(input)))),
    ("decodeFromBase64", decode_from_base64),
    ("randomInt", random_int),
];

/// Processor for the built-in string expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringExpressionProcessors;

impl StringExpressionProcessors {
    /// Creates the processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the supported expression names.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        EXPRESSIONS.iter().map(|(name, _)| *name).collect()
    }
}

impl ExpressionProcessor for StringExpressionProcessors {
    fn execute(&self, expression: &str) -> ExpressionResult {
        let Some(call) = CALL.captures(expression) else {
            return Ok(None);
        };
        let (name, arguments) = (&call[1], call.get(2).map_or("", |m| m.as_str()));
        let Some(&(canonical, evaluate)) = EXPRESSIONS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };
        debug!(expression = canonical, "evaluating string expression");
        evaluate(canonical, arguments).map(Some)
    }
}

fn text(value: &str) -> Value {
    Value::from(value)
}

fn substring_before(name: &str, input: &str) -> Result<Value, ExpressionError> {
    let [value, separator] = two_arguments(name, input)?;
    let before = value.find(&separator).map_or(value.as_str(), |index| &value[..index]);
    Ok(text(before))
}

fn substring_after(name: &str, input: &str) -> Result<Value, ExpressionError> {
    let [value, separator] = two_arguments(name, input)?;
    let after = value
        .find(&separator)
        .map_or("", |index| &value[index + separator.len()..]);
    Ok(text(after))
}

fn two_arguments(name: &str, input: &str) -> Result<[String; 2], ExpressionError> {
    let arguments = expect_arguments(name, input, 2)?;
    <[String; 2]>::try_from(arguments).map_err(|arguments| {
        ExpressionError::InvalidArguments(format!("unexpected arguments: {arguments:?}"))
    })
}

fn any_of(_: &str, input: &str) -> Result<Value, ExpressionError> {
    let options = parse_arguments(input);
    let choice = options.choose(&mut rand::rng()).map_or("", String::as_str);
    Ok(text(choice))
}

fn decode_from_base64(name: &str, input: &str) -> Result<Value, ExpressionError> {
    let evaluation = |reason: String| ExpressionError::Evaluation {
        expression: format!("{name}({input})"),
        reason,
    };
    let bytes = STANDARD
        .decode(input.trim())
        .map_err(|e| evaluation(e.to_string()))?;
    let decoded = String::from_utf8(bytes).map_err(|e| evaluation(e.to_string()))?;
    Ok(Value::String(decoded))
}

fn random_int(name: &str, input: &str) -> Result<Value, ExpressionError> {
    let [min, max] = two_arguments(name, input)?;
    let parse = |bound: &str| {
        bound.parse::<i64>().map_err(|e| ExpressionError::Evaluation {
            expression: format!("{name}({input})"),
            reason: format!("'{bound}' is not an integer: {e}"),
        })
    };
    let (min, max) = (parse(&min)?, parse(&max)?);
    if min > max {
        return Err(ExpressionError::Evaluation {
            expression: format!("{name}({input})"),
            reason: format!("minimum {min} is greater than maximum {max}"),
        });
    }
    Ok(Value::Integer(rand::rng().random_range(min..=max)))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Applies `f` to every whitespace-delimited word, keeping the whitespace.
fn map_words(input: &str, f: fn(&str) -> String) -> String {
    let mut result = String::with_capacity(input.len());
    let mut word_start = None;
    for (index, ch) in input.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (true, Some(start)) => {
                result.push_str(&f(&input[start..index]));
                result.push(ch);
                word_start = None;
            }
            (true, None) => result.push(ch),
            (false, None) => word_start = Some(index),
            (false, Some(_)) => {}
        }
    }
    if let Some(start) = word_start {
        result.push_str(&f(&input[start..]));
    }
    result
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_json(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '/' => escaped.push_str("\\/"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Wraps the input in `\Q...\E`, splitting any `\E` it contains.
fn quote_regex(input: &str) -> String {
    format!("\\Q{}\\E", input.replace("\\E", "\\E\\\\E\\Q"))
}
