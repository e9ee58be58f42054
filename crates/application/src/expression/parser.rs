//! Expression span parser for `#{...}` syntax
//!
//! An expression ends at the first `}` outside parentheses that closes no
//! brace opened in its body. Braces between parentheses are argument text.

use std::ops::Range;

/// Opening sequence of an expression.
pub const EXPRESSION_START: &str = "#{";

/// A located `#{...}` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSpan {
    /// Byte range of the whole expression, including `#{` and `}`.
    pub span: Range<usize>,

    /// Byte range of the body between the delimiters.
    pub body: Range<usize>,
}

impl ExpressionSpan {
    /// Returns the body text.
    #[must_use]
    pub fn body<'a>(&self, input: &'a str) -> &'a str {
        &input[self.body.clone()]
    }
}

/// Finds the first complete expression starting at or after `from`.
///
/// An opening `#{` without a matching end is skipped and the search
/// continues after it.
#[must_use]
pub fn find_expression(input: &str, from: usize) -> Option<ExpressionSpan> {
    let mut search = from;
    while let Some(offset) = input.get(search..)?.find(EXPRESSION_START) {
        let start = search + offset;
        let body_start = start + EXPRESSION_START.len();
        if let Some(end) = find_expression_end(input.as_bytes(), body_start) {
            return Some(ExpressionSpan {
                span: start..end + 1,
                body: body_start..end,
            });
        }
        search = body_start;
    }
    None
}

fn find_expression_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut parens = 0_usize;
    let mut braces = 0_usize;

    for (offset, byte) in bytes[from..].iter().enumerate() {
        match byte {
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'{' if parens == 0 => braces += 1,
            b'}' if parens == 0 => {
                if braces == 0 {
                    return Some(from + offset);
                }
                braces -= 1;
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(input: &str) -> Option<&str> {
        find_expression(input, 0).map(|expression| expression.body(input))
    }

    #[test]
    fn test_simple_expression() {
        let expression = find_expression("#{target}", 0).unwrap();
        assert_eq!(expression.span, 0..9);
        assert_eq!(expression.body, 2..8);
    }

    #[test]
    fn test_expression_inside_text() {
        assert_eq!(body("This #{target} is simple"), Some("target"));
    }

    #[test]
    fn test_braces_inside_parentheses() {
        assert_eq!(
            body("#{exp(\\}{BNS_TRX_ID=, A, value)}"),
            Some("exp(\\}{BNS_TRX_ID=, A, value)")
        );
        assert_eq!(
            body("#{target (something inside#$)}"),
            Some("target (something inside#$)")
        );
    }

    #[test]
    fn test_nested_expression_body() {
        assert_eq!(body("#{string(#{integer()})}"), Some("string(#{integer()})"));
        assert_eq!(body("#{a{b}c}"), Some("a{b}c"));
    }

    #[test]
    fn test_unclosed_expression_is_skipped() {
        assert_eq!(body("#{unclosed and #{ok}"), Some("ok"));
        assert_eq!(body("#{unclosed"), None);
        assert_eq!(body("#{call(} #{ok}"), Some("ok"));
    }

    #[test]
    fn test_search_from_offset() {
        let input = "#{a} #{b}";
        let expression = find_expression(input, 4).unwrap();
        assert_eq!(expression.body(input), "b");
    }

    #[test]
    fn test_no_expression() {
        assert_eq!(body("${variable}"), None);
        assert_eq!(body("# {x}"), None);
    }
}
