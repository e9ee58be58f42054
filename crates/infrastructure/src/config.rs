//! Resolver settings
//!
//! Settings are read from a YAML file with kebab-case keys:
//!
//! ```yaml
//! dry-run: false
//! environment-fallback: true
//! batch-variables:
//!   host: example.com
//! story-variables:
//!   users:
//!     - name: alice
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use vividus_domain::{Value, VariableMap, Variables};

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {}: {source}", .path.display())]
    Io {
        /// The settings file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings are not valid YAML or have unexpected keys.
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A mapping key is not a scalar.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),
}

/// Settings of the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ResolverSettings {
    /// Skips dynamic variables and expressions.
    pub dry_run: bool,
    /// Falls back to environment variables for unknown keys.
    pub environment_fallback: bool,
    /// Variables shared by all stories of the run.
    pub batch_variables: IndexMap<String, serde_yaml::Value>,
    /// Variables of the current story.
    pub story_variables: IndexMap<String, serde_yaml::Value>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            environment_fallback: true,
            batch_variables: IndexMap::new(),
            story_variables: IndexMap::new(),
        }
    }
}

impl ResolverSettings {
    /// Parses settings from YAML text. An empty document yields defaults.
    ///
    /// # Errors
    /// Returns an error if the text is not valid settings YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads settings from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&yaml)?;
        debug!(
            path = %path.display(),
            batch = settings.batch_variables.len(),
            story = settings.story_variables.len(),
            "loaded resolver settings"
        );
        Ok(settings)
    }

    /// Builds the variable store described by the settings.
    ///
    /// # Errors
    /// Returns an error if a variable value cannot be represented.
    pub fn variables(&self) -> Result<Variables, ConfigError> {
        let mut variables = Variables::with_batch_variables(to_variable_map(&self.batch_variables)?)
            .with_environment_fallback(self.environment_fallback);
        for (key, value) in to_variable_map(&self.story_variables)? {
            variables.put_story_variable(key, value);
        }
        Ok(variables)
    }
}

fn to_variable_map(
    entries: &IndexMap<String, serde_yaml::Value>,
) -> Result<VariableMap, ConfigError> {
    entries
        .iter()
        .map(|(key, value)| Ok((key.clone(), yaml_to_value(value)?)))
        .collect()
}

/// Converts a YAML value to a variable value.
///
/// Null becomes an empty string; tags are ignored.
///
/// # Errors
/// Returns an error for mappings with non-scalar keys.
pub fn yaml_to_value(yaml: &serde_yaml::Value) -> Result<Value, ConfigError> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::String(String::new()),
        Yaml::Bool(flag) => Value::Boolean(*flag),
        Yaml::Number(number) => number
            .as_i64()
            .map(Value::Integer)
            .or_else(|| number.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::String(number.to_string())),
        Yaml::String(text) => Value::String(text.clone()),
        Yaml::Sequence(items) => {
            Value::List(items.iter().map(yaml_to_value).collect::<Result<_, ConfigError>>()?)
        }
        Yaml::Mapping(mapping) => Value::Map(
            mapping
                .iter()
                .map(|(key, value)| Ok((yaml_key(key)?, yaml_to_value(value)?)))
                .collect::<Result<_, ConfigError>>()?,
        ),
        Yaml::Tagged(tagged) => yaml_to_value(&tagged.value)?,
    })
}

fn yaml_key(key: &serde_yaml::Value) -> Result<String, ConfigError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(text) => Ok(text.clone()),
        Yaml::Bool(flag) => Ok(flag.to_string()),
        Yaml::Number(number) => Ok(number.to_string()),
        other => Err(ConfigError::UnsupportedKey(format!("{other:?}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SETTINGS: &str = r"
dry-run: true
environment-fallback: false
batch-variables:
  host: example.com
  port: 8080
story-variables:
  host: story.example.com
  ratio: 0.5
  enabled: true
  empty:
  users:
    - name: alice
      roles: [admin, dev]
";

    #[test]
    fn test_defaults() {
        let settings = ResolverSettings::from_yaml("").unwrap();
        assert_eq!(settings, ResolverSettings::default());
        assert!(settings.environment_fallback);
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_parse_settings() {
        let settings = ResolverSettings::from_yaml(SETTINGS).unwrap();
        assert!(settings.dry_run);
        assert!(!settings.environment_fallback);
        assert_eq!(settings.batch_variables.len(), 2);
        assert_eq!(settings.story_variables.len(), 5);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let error = ResolverSettings::from_yaml("dryRun: true").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_variables_from_settings() {
        let variables = ResolverSettings::from_yaml(SETTINGS)
            .unwrap()
            .variables()
            .unwrap();

        assert_eq!(variables.get_variable("host"), Some(Value::from("story.example.com")));
        assert_eq!(variables.get_variable("port"), Some(Value::Integer(8080)));
        assert_eq!(variables.get_variable("ratio"), Some(Value::Float(0.5)));
        assert_eq!(variables.get_variable("enabled"), Some(Value::Boolean(true)));
        assert_eq!(variables.get_variable("empty"), Some(Value::from("")));
        assert_eq!(variables.get_variable("users[0].name"), Some(Value::from("alice")));
        assert_eq!(
            variables.get_variable("users[0].roles"),
            Some(Value::List(vec![Value::from("admin"), Value::from("dev")]))
        );
        assert_eq!(variables.get_variable("PATH"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SETTINGS.as_bytes()).unwrap();

        let settings = ResolverSettings::load(file.path()).unwrap();
        assert!(settings.dry_run);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = ResolverSettings::load(&dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
        assert!(error.to_string().contains("missing.yml"));
    }

    #[test]
    fn test_non_scalar_key() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: value\n").unwrap();
        assert!(matches!(yaml_to_value(&yaml), Err(ConfigError::UnsupportedKey(_))));
    }
}
