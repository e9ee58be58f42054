//! Built-in dynamic variables
//!
//! These variables generate a new value on each resolution. They are
//! registered under hyphenated names (`random-uuid`) and are reachable in
//! camelCase as well (`randomUuid`).

use std::sync::Arc;

use chrono::{Local, Utc};
use rand::Rng;
use uuid::Uuid;
use vividus_application::ports::{DynamicVariable, DynamicVariableResult};
use vividus_application::variable_resolver::{DynamicVariableRegistry, SharedDynamicVariable};
use vividus_domain::Value;

/// Information about a built-in variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinInfo {
    /// Hyphenated variable name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Example output
    pub example: &'static str,
}

/// A built-in variable backed by a generator function.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinVariable {
    info: &'static BuiltinInfo,
    generate: fn() -> Value,
}

impl BuiltinVariable {
    /// Returns the variable description.
    #[must_use]
    pub const fn info(&self) -> &'static BuiltinInfo {
        self.info
    }
}

impl DynamicVariable for BuiltinVariable {
    fn calculate_value(&self) -> DynamicVariableResult {
        Ok((self.generate)())
    }
}

const BUILTINS: &[(BuiltinInfo, fn() -> Value)] = &[
    (
        BuiltinInfo {
            name: "random-uuid",
            description: "Random UUID v4",
            example: "550e8400-e29b-41d4-a716-446655440000",
        },
        generate_uuid,
    ),
    (
        BuiltinInfo {
            name: "current-timestamp",
            description: "Unix timestamp in seconds",
            example: "1706284800",
        },
        generate_timestamp,
    ),
    (
        BuiltinInfo {
            name: "current-date-time",
            description: "ISO 8601 timestamp (UTC)",
            example: "2024-01-26T12:00:00+00:00",
        },
        generate_date_time,
    ),
    (
        BuiltinInfo {
            name: "current-date",
            description: "Current local date (YYYY-MM-DD)",
            example: "2024-01-26",
        },
        generate_date,
    ),
    (
        BuiltinInfo {
            name: "random-int",
            description: "Random integer 0-1000",
            example: "427",
        },
        generate_random_int,
    ),
    (
        BuiltinInfo {
            name: "random-string",
            description: "Random alphanumeric string (16 chars)",
            example: "aB3dE5fG7hI9jK1m",
        },
        generate_random_string,
    ),
    (
        BuiltinInfo {
            name: "random-alphanumeric",
            description: "Random alphanumeric string (8 chars)",
            example: "aB3dE5fG",
        },
        generate_random_alphanumeric,
    ),
    (
        BuiltinInfo {
            name: "random-email",
            description: "Random email address",
            example: "abc12def@example.com",
        },
        generate_random_email,
    ),
    (
        BuiltinInfo {
            name: "random-first-name",
            description: "Random first name",
            example: "John",
        },
        generate_random_first_name,
    ),
    (
        BuiltinInfo {
            name: "random-last-name",
            description: "Random last name",
            example: "Smith",
        },
        generate_random_last_name,
    ),
    (
        BuiltinInfo {
            name: "random-boolean",
            description: "Random boolean (true/false)",
            example: "true",
        },
        generate_random_boolean,
    ),
];

/// Returns all built-in variables.
#[must_use]
pub fn builtin_variables() -> Vec<BuiltinVariable> {
    BUILTINS
        .iter()
        .map(|(info, generate)| BuiltinVariable {
            info,
            generate: *generate,
        })
        .collect()
}

/// Returns descriptions of all built-in variables.
#[must_use]
pub fn available() -> Vec<&'static BuiltinInfo> {
    BUILTINS.iter().map(|(info, _)| info).collect()
}

/// Creates a registry holding every built-in variable.
#[must_use]
pub fn builtin_registry() -> DynamicVariableRegistry {
    DynamicVariableRegistry::new(builtin_variables().into_iter().map(|variable| {
        let shared: SharedDynamicVariable = Arc::new(variable);
        (variable.info.name.to_string(), shared)
    }))
}

fn generate_uuid() -> Value {
    Value::String(Uuid::new_v4().to_string())
}

fn generate_timestamp() -> Value {
    Value::Integer(Utc::now().timestamp())
}

fn generate_date_time() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

fn generate_date() -> Value {
    Value::String(Local::now().date_naive().format("%Y-%m-%d").to_string())
}

fn generate_random_int() -> Value {
    Value::Integer(rand::rng().random_range(0..=1000))
}

fn generate_random_string() -> Value {
    Value::String(random_alphanumeric_string(16))
}

fn generate_random_alphanumeric() -> Value {
    Value::String(random_alphanumeric_string(8))
}

fn random_alphanumeric_string(len: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}

fn generate_random_email() -> Value {
    let local_part = random_alphanumeric_string(8).to_lowercase();
    Value::String(format!("{local_part}@example.com"))
}

fn generate_random_first_name() -> Value {
    const FIRST_NAMES: &[&str] = &[
        "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
        "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas",
        "Sarah", "Charles", "Karen", "Emma", "Olivia", "Liam", "Noah", "Ava",
    ];
    pick(FIRST_NAMES)
}

fn generate_random_last_name() -> Value {
    const LAST_NAMES: &[&str] = &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
        "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    ];
    pick(LAST_NAMES)
}

fn pick(options: &[&str]) -> Value {
    let index = rand::rng().random_range(0..options.len());
    Value::from(options[index])
}

fn generate_random_boolean() -> Value {
    Value::Boolean(rand::rng().random_bool(0.5))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn calculate(name: &str) -> Value {
        builtin_registry()
            .get(name)
            .unwrap_or_else(|| unreachable!("{name} is not registered"))
            .calculate_value()
            .unwrap()
    }

    #[test]
    fn test_registry_has_both_spellings() {
        let registry = builtin_registry();
        for info in available() {
            assert!(registry.contains(info.name), "missing {}", info.name);
        }
        assert!(registry.contains("randomUuid"));
        assert!(registry.contains("currentDateTime"));
        assert_eq!(registry.len(), BUILTINS.len() * 2);
    }

    #[test]
    fn test_uuid() {
        let value = calculate("random-uuid");
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 36);
        assert!(Uuid::parse_str(text).is_ok());
        assert_ne!(calculate("randomUuid"), value);
    }

    #[test]
    fn test_timestamp_is_integer() {
        let Value::Integer(timestamp) = calculate("current-timestamp") else {
            unreachable!("timestamp must be an integer");
        };
        assert!(timestamp > 1_700_000_000);
    }

    #[test]
    fn test_date_format() {
        let value = calculate("current-date");
        let text = value.as_str().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_date_time_format() {
        let value = calculate("currentDateTime");
        assert!(chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_random_int_range() {
        for _ in 0..100 {
            let Value::Integer(number) = calculate("random-int") else {
                unreachable!("random-int must be an integer");
            };
            assert!((0..=1000).contains(&number));
        }
    }

    #[test]
    fn test_random_strings() {
        let value = calculate("random-string");
        let text = value.as_str().unwrap();
        assert_eq!(text.len(), 16);
        assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));

        assert_eq!(calculate("random-alphanumeric").as_str().unwrap().len(), 8);
    }

    #[test]
    fn test_random_email() {
        let value = calculate("random-email");
        let text = value.as_str().unwrap();
        assert!(text.ends_with("@example.com"));
        assert_eq!(text.len(), 8 + "@example.com".len());
    }

    #[test]
    fn test_random_names_and_boolean() {
        assert!(!calculate("random-first-name").as_str().unwrap().is_empty());
        assert!(!calculate("randomLastName").as_str().unwrap().is_empty());
        assert!(matches!(calculate("random-boolean"), Value::Boolean(_)));
    }

    #[test]
    fn test_builtin_info() {
        let variables = builtin_variables();
        assert_eq!(variables.len(), available().len());
        assert_eq!(variables[0].info().name, "random-uuid");
    }
}
