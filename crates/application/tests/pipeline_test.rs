//! Resolution pipeline assembled from public building blocks
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use vividus_application::{
    BoxedExpressionProcessor, ConversionError, DynamicVariableRegistry, DynamicVariableResult,
    ExpressionAdaptor, ExpressionResult, ParameterConverter, ParameterConverters,
    ParameterConvertersDecorator, PlaceholderResolver, SharedDynamicVariable, VariableResolver,
};
use vividus_domain::{ConvertedParameter, ParameterType, Value, Variables};

struct ShoutingConverter;

impl ParameterConverter for ShoutingConverter {
    fn accepts(&self, target: &ParameterType) -> bool {
        *target == ParameterType::String
    }

    fn convert(
        &self,
        value: &str,
        _target: &ParameterType,
        _converters: &ParameterConverters,
    ) -> Result<ConvertedParameter, ConversionError> {
        Ok(Value::from(value.to_uppercase()).into())
    }
}

fn decorator(variables: Variables) -> ParameterConvertersDecorator {
    let current_user: SharedDynamicVariable =
        Arc::new(|| -> DynamicVariableResult { Ok(Value::from("alice")) });
    let registry = DynamicVariableRegistry::new([("current-user".to_string(), current_user)]);

    let reverse: BoxedExpressionProcessor = Box::new(|expression: &str| -> ExpressionResult {
        Ok(expression
            .strip_prefix("reverse(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(|argument| Value::from(argument.chars().rev().collect::<String>())))
    });

    ParameterConvertersDecorator::new(
        PlaceholderResolver::new(
            VariableResolver::new(variables, registry),
            ExpressionAdaptor::new(vec![reverse]),
        ),
        ParameterConverters::standard(),
    )
}

fn convert(decorator: &ParameterConvertersDecorator, value: &str, target: &ParameterType) -> Value {
    decorator
        .convert(Some(value), target)
        .unwrap()
        .and_then(ConvertedParameter::into_value)
        .unwrap()
}

#[test]
fn test_variables_dynamic_variables_and_expressions() {
    let mut variables = Variables::new();
    variables.put_scenario_variable("inner", "word");
    variables.put_scenario_variable("word", "stressed");
    let decorator = decorator(variables);

    assert_eq!(
        convert(&decorator, "#{reverse(${${inner}})} by ${current-user}", &ParameterType::String),
        Value::from("desserts by alice")
    );
    assert_eq!(
        convert(&decorator, "${currentUser}", &ParameterType::String),
        Value::from("alice")
    );
}

#[test]
fn test_step_scope_lifecycle() {
    fn scope(decorator: &mut ParameterConvertersDecorator) -> &mut Variables {
        decorator
            .placeholder_resolver_mut()
            .variable_resolver_mut()
            .context_mut()
    }

    let mut decorator = decorator(Variables::new());

    scope(&mut decorator).put_step_variable("item", "apple");
    assert_eq!(
        convert(&decorator, "${item}", &ParameterType::String),
        Value::from("apple")
    );

    scope(&mut decorator).clear_step_variables();
    assert_eq!(
        convert(&decorator, "${item}", &ParameterType::String),
        Value::from("${item}")
    );
}

#[test]
fn test_circular_reference_terminates() {
    let mut variables = Variables::new();
    variables.put_story_variable("a", "${b}");
    variables.put_story_variable("b", "${a}");
    let decorator = decorator(variables);

    assert_eq!(
        convert(&decorator, "${a}", &ParameterType::String),
        Value::from("${b}")
    );
}

#[test]
fn test_typed_targets() {
    let mut variables = Variables::new();
    variables.put_batch_variable("count", 3);
    variables.put_batch_variable("blank", "");
    let decorator = decorator(variables);

    assert_eq!(
        convert(&decorator, "${count}", &ParameterType::Integer),
        Value::Integer(3)
    );
    assert_eq!(
        convert(&decorator, "${count}, 4", &ParameterType::list(ParameterType::Integer)),
        Value::List(vec![Value::Integer(3), Value::Integer(4)])
    );
    assert_eq!(
        decorator
            .convert(Some("${blank}"), &ParameterType::optional(ParameterType::String))
            .unwrap(),
        Some(ConvertedParameter::Optional(None))
    );
    assert_eq!(decorator.convert(None, &ParameterType::String).unwrap(), None);
}

#[test]
fn test_added_converter_takes_priority() {
    let mut variables = Variables::new();
    variables.put_scenario_variable("name", "world");
    let mut decorator = decorator(variables);
    decorator.converters_mut().add_converter(Box::new(ShoutingConverter));

    assert_eq!(
        convert(&decorator, "hello ${name}", &ParameterType::String),
        Value::from("HELLO WORLD")
    );
    assert_eq!(
        convert(&decorator, "${name}", &ParameterType::Any),
        Value::from("world")
    );
}
