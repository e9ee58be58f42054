//! Pipeline assembly
//!
//! Wires the built-in dynamic variables, expression processors and standard
//! converters into a ready-to-use decorator.

use tracing::info;
use vividus_application::{
    BoxedExpressionProcessor, ExpressionAdaptor, ParameterConverters,
    ParameterConvertersDecorator, PlaceholderResolver, VariableResolver,
};
use vividus_domain::Variables;

use crate::config::{ConfigError, ResolverSettings};
use crate::dynamic_variables::builtin_registry;
use crate::expressions::StringExpressionProcessors;

/// Creates the built-in expression processors, in priority order.
#[must_use]
pub fn builtin_expression_processors() -> Vec<BoxedExpressionProcessor> {
    vec![Box::new(StringExpressionProcessors::new())]
}

/// Builds a decorator over the given variables.
#[must_use]
pub fn build_decorator(variables: Variables, dry_run: bool) -> ParameterConvertersDecorator {
    let variable_resolver =
        VariableResolver::new(variables, builtin_registry()).with_dry_run(dry_run);
    let expression_adaptor =
        ExpressionAdaptor::new(builtin_expression_processors()).with_dry_run(dry_run);
    ParameterConvertersDecorator::new(
        PlaceholderResolver::new(variable_resolver, expression_adaptor),
        ParameterConverters::standard(),
    )
}

/// Builds a decorator configured by the settings.
///
/// # Errors
/// Returns an error if the configured variables cannot be represented.
pub fn build_from_settings(
    settings: &ResolverSettings,
) -> Result<ParameterConvertersDecorator, ConfigError> {
    let variables = settings.variables()?;
    info!(dry_run = settings.dry_run, "resolution pipeline ready");
    Ok(build_decorator(variables, settings.dry_run))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vividus_domain::{ConvertedParameter, ParameterType, Value};

    fn resolve(decorator: &ParameterConvertersDecorator, value: &str) -> Value {
        decorator
            .convert(Some(value), &ParameterType::String)
            .unwrap()
            .and_then(ConvertedParameter::into_value)
            .unwrap()
    }

    #[test]
    fn test_variables_and_expressions() {
        let mut variables = Variables::new();
        variables.put_scenario_variable("name", "  world  ");
        let decorator = build_decorator(variables, false);

        assert_eq!(
            resolve(&decorator, "Hello, #{toUpperCase(#{trim(${name})})}!"),
            Value::from("Hello, WORLD!")
        );
    }

    #[test]
    fn test_dynamic_variable_in_expression() {
        let decorator = build_decorator(Variables::new(), false);
        let value = resolve(&decorator, "#{toUpperCase(${random-uuid})}");
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 36);
        assert_eq!(text, text.to_uppercase());
    }

    #[test]
    fn test_dry_run_keeps_dynamic_parts() {
        let mut variables = Variables::new();
        variables.put_story_variable("user", "alice");
        let decorator = build_decorator(variables, true);

        assert_eq!(
            resolve(&decorator, "${user} #{trim( x )} ${currentDate}"),
            Value::from("alice #{trim( x )} ${currentDate}")
        );
    }

    #[test]
    fn test_build_from_settings() {
        let settings = ResolverSettings::from_yaml(
            "batch-variables:\n  port: 8080\nstory-variables:\n  host: localhost\n",
        )
        .unwrap();
        let decorator = build_from_settings(&settings).unwrap();

        assert_eq!(
            resolve(&decorator, "http://${host}:${port}"),
            Value::from("http://localhost:8080")
        );
        assert_eq!(
            decorator
                .convert(Some("${port}"), &ParameterType::Integer)
                .unwrap(),
            Some(ConvertedParameter::Value(Value::Integer(8080)))
        );
    }

    #[test]
    fn test_whole_floats_keep_decimal_point_in_text() {
        let settings =
            ResolverSettings::from_yaml("batch-variables:\n  rate: 1.0\n  ratio: 0.25\n").unwrap();
        let decorator = build_from_settings(&settings).unwrap();

        assert_eq!(
            resolve(&decorator, "rate=${rate}, ratio=${ratio}"),
            Value::from("rate=1.0, ratio=0.25")
        );
        assert_eq!(resolve(&decorator, "${rate}"), Value::from("1.0"));
    }
}
