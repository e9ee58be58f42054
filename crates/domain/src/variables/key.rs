//! Variable key syntax: `name:default`, `name[0]`, `name.key`

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static COMPOUND_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\[\].:]+):?(?:\[(\d+)])?:?(?:\.([^:]+))?:?")
        .expect("compound variable key pattern is valid")
});

/// A variable key split into its name and optional default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VariableKey<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub default_value: Option<&'a str>,
}

impl<'a> VariableKey<'a> {
    /// The default value is everything after the last colon.
    pub fn parse(key: &'a str) -> Self {
        match key.rfind(':') {
            Some(colon) => Self {
                key,
                name: &key[..colon],
                default_value: Some(&key[colon + 1..]),
            },
            None => Self {
                key,
                name: key,
                default_value: None,
            },
        }
    }
}

/// Parts of a compound key like `users[1].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompoundKey<'a> {
    pub name: &'a str,
    pub index: Option<usize>,
    pub field: Option<&'a str>,
}

impl<'a> CompoundKey<'a> {
    pub fn parse(key: &'a str) -> Option<Self> {
        let captures = COMPOUND_KEY.captures(key)?;
        let name = captures.get(1)?.as_str();
        let index = captures
            .get(2)
            .and_then(|index| index.as_str().parse().ok());
        let field = captures.get(3).map(|field| field.as_str());
        Some(Self { name, index, field })
    }
}
