//! Placeholder parser for `${variable}` syntax
//!
//! Locates balanced placeholder spans in a string. Placeholders may nest
//! (`${outer${inner}}`); a `}` that closes nothing is plain text and an
//! unclosed `${` never yields a span.

use std::ops::Range;

/// Opening sequence of a placeholder.
pub const PLACEHOLDER_START: &str = "${";

/// A balanced placeholder located in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    /// Byte range of the whole placeholder, including `${` and `}`.
    pub span: Range<usize>,

    /// Byte range of the key between the delimiters.
    pub key: Range<usize>,
}

impl PlaceholderSpan {
    /// Returns the raw key text (which may contain nested placeholders).
    #[must_use]
    pub fn key<'a>(&self, input: &'a str) -> &'a str {
        &input[self.key.clone()]
    }

    /// Returns the full placeholder text.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }

    /// Returns true if the placeholder covers the whole input, ignoring
    /// leading and trailing line breaks.
    #[must_use]
    pub fn is_whole_input(&self, input: &str) -> bool {
        input.trim_matches(['\r', '\n']) == self.text(input)
    }
}

/// Finds the first balanced placeholder starting at or after `from`.
///
/// # Examples
///
/// ```
/// use vividus_application::variable_resolver::parser::find_placeholder;
///
/// let input = "id: ${user${index}}";
/// let placeholder = find_placeholder(input, 0).unwrap();
/// assert_eq!(placeholder.text(input), "${user${index}}");
/// assert_eq!(placeholder.key(input), "user${index}");
/// ```
#[must_use]
pub fn find_placeholder(input: &str, from: usize) -> Option<PlaceholderSpan> {
    let bytes = input.as_bytes();
    let mut depth = 0_usize;
    let mut start = from;
    let mut index = from;

    while index < bytes.len() {
        match bytes[index] {
            b'$' if bytes.get(index + 1) == Some(&b'{') => {
                if depth == 0 {
                    start = index;
                }
                depth += 1;
                index += 2;
                continue;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(PlaceholderSpan {
                        span: start..index + 1,
                        key: start + 2..index,
                    });
                }
            }
            _ => {}
        }
        index += 1;
    }

    None
}

/// Parses a string and returns all top-level placeholders in order.
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<PlaceholderSpan> {
    let mut placeholders = Vec::new();
    let mut position = 0;

    while let Some(placeholder) = find_placeholder(input, position) {
        position = placeholder.span.end;
        placeholders.push(placeholder);
    }

    placeholders
}

/// Returns true if the input contains at least one balanced placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    find_placeholder(input, 0).is_some()
}

/// Extracts the raw keys of all top-level placeholders.
#[must_use]
pub fn extract_variable_names(input: &str) -> Vec<String> {
    parse_placeholders(input)
        .iter()
        .map(|placeholder| placeholder.key(input).to_string())
        .collect()
}
