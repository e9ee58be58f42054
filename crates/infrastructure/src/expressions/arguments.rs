//! Expression argument parsing
//!
//! Arguments are separated by commas. A comma preceded by a backslash is
//! part of the argument (the backslash is dropped). An argument wrapped in
//! triple double quotes (`"""a,b"""`) is taken literally. Unquoted
//! arguments are trimmed.

use vividus_application::ports::ExpressionError;

const QUOTE: &str = "\"\"\"";

/// Splits an argument list into its arguments.
///
/// Blank input has no arguments.
#[must_use]
pub fn parse_arguments(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let mut rest = input;
    loop {
        let (argument, remainder) = next_argument(rest);
        arguments.push(argument);
        match remainder {
            Some(remainder) => rest = remainder,
            None => return arguments,
        }
    }
}

/// Parses the arguments and checks their number.
///
/// # Errors
/// Returns [`ExpressionError::InvalidArguments`] if the number differs.
pub fn expect_arguments(
    name: &str,
    input: &str,
    expected: usize,
) -> Result<Vec<String>, ExpressionError> {
    let arguments = parse_arguments(input);
    if arguments.len() == expected {
        return Ok(arguments);
    }
    let found = arguments.len();
    let noun = if found == 1 { "argument" } else { "arguments" };
    Err(ExpressionError::InvalidArguments(format!(
        "The expected number of arguments for '{name}' expression is {expected}, but found \
         {found} {noun}: '{}'",
        input.trim()
    )))
}

/// Reads one argument; returns it with the text after its separator.
fn next_argument(input: &str) -> (String, Option<&str>) {
    let trimmed = input.trim_start();
    if let Some(quoted) = trimmed.strip_prefix(QUOTE)
        && let Some(end) = quoted.find(QUOTE)
    {
        let after = &quoted[end + QUOTE.len()..];
        let remainder = after.find(',').map(|comma| &after[comma + 1..]);
        return (quoted[..end].to_string(), remainder);
    }

    let mut argument = String::new();
    let mut chars = input.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' if chars.peek().is_some_and(|(_, next)| *next == ',') => {
                argument.push(',');
                chars.next();
            }
            ',' => return (argument.trim().to_string(), Some(&input[index + 1..])),
            _ => argument.push(ch),
        }
    }
    (argument.trim().to_string(), None)
}
