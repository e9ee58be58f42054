//! Command line interface of `vividus-resolve`

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use vividus_application::ApplicationError;
use vividus_domain::{ConvertedParameter, ParameterType, Value};
use vividus_infrastructure::{ConfigError, ResolverSettings, build_decorator};

/// Resolve VIVIDUS step parameters from the command line
#[derive(Parser, Debug)]
#[command(name = "vividus-resolve")]
#[command(about = "Resolve ${...} placeholders and #{...} expressions in a step parameter", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file with variables (YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Target type, e.g. string, int, float, bool, list<int>, optional<string>, data
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "string")]
    pub target: ParameterType,

    /// Scenario variable; may be repeated
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    pub variables: Vec<(String, String)>,

    /// Skip dynamic variables and expressions
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Parameter value to resolve
    pub value: String,
}

/// Errors reported by the command line tool.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The value could not be resolved or converted.
    #[error(transparent)]
    Resolution(#[from] ApplicationError),

    /// The result could not be serialized.
    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The result could not be written.
    #[error("failed to write result: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_variable(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, found '{input}'"))
}

/// Resolves the value described by the arguments and writes the result.
///
/// # Errors
/// Returns an error if settings cannot be loaded, resolution fails or the
/// output cannot be written.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let settings = match &cli.config {
        Some(path) => ResolverSettings::load(path)?,
        None => ResolverSettings::default(),
    };
    let dry_run = settings.dry_run || cli.dry_run;

    let mut variables = settings.variables()?;
    for (key, value) in &cli.variables {
        variables.put_scenario_variable(key.clone(), value.as_str());
    }
    debug!(target_type = %cli.target, dry_run, "resolving parameter");

    let decorator = build_decorator(variables, dry_run);
    let converted = decorator.convert(Some(&cli.value), &cli.target)?;
    writeln!(out, "{}", render(converted.as_ref())?)?;
    Ok(())
}

/// Formats a converted parameter for output.
///
/// Strings are printed as they are, other values as JSON, absent values as
/// `null` and sub-steps one per line.
///
/// # Errors
/// Returns an error if a value cannot be serialized.
pub fn render(converted: Option<&ConvertedParameter>) -> Result<String, serde_json::Error> {
    match converted {
        None | Some(ConvertedParameter::Optional(None)) => Ok("null".to_string()),
        Some(ConvertedParameter::Optional(Some(inner))) => render(Some(inner.as_ref())),
        Some(ConvertedParameter::Value(value)) => render_value(value),
        Some(ConvertedParameter::Data(data)) => match data.value() {
            Value::Bytes(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            value => render_value(value),
        },
        Some(ConvertedParameter::SubSteps(steps)) => Ok(steps.steps().join("\n")),
    }
}

fn render_value(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => serde_json::to_string(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vividus_domain::{DataWrapper, SubSteps};

    #[test]
    fn test_parse_variable() {
        assert_eq!(
            parse_variable("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_variable("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_variable("novalue").is_err());
        assert!(parse_variable("=value").is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(render(None).unwrap(), "null");
        assert_eq!(
            render(Some(&ConvertedParameter::Value(Value::from("text")))).unwrap(),
            "text"
        );
        assert_eq!(
            render(Some(&ConvertedParameter::Value(Value::List(vec![
                Value::Integer(1),
                Value::Boolean(true)
            ]))))
            .unwrap(),
            "[1,true]"
        );
        assert_eq!(
            render(Some(&ConvertedParameter::Optional(Some(Box::new(
                ConvertedParameter::Value(Value::Float(1.5))
            )))))
            .unwrap(),
            "1.5"
        );
        assert_eq!(
            render(Some(&ConvertedParameter::Data(DataWrapper::new(Value::Bytes(
                b"raw".to_vec()
            )))))
            .unwrap(),
            "raw"
        );
        assert_eq!(
            render(Some(&ConvertedParameter::SubSteps(SubSteps::parse("Given a\nWhen b")))).unwrap(),
            "Given a\nWhen b"
        );
    }
}
