use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Translator configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Longest member chain accepted by the select/expand builder
    #[validate(range(
        min = 1,
        max = 64,
        message = "Max expand depth must be between 1 and 64"
    ))]
    pub max_expand_depth: u32,

    /// Inserted between the parts of a generated aggregate alias
    pub alias_separator: String,

    /// Reject aliases that are not OData simple identifiers
    pub validate_alias_identifiers: bool,

    /// Keyword of the implicit range-variable segment
    #[validate(length(min = 1, message = "Range variable cannot be empty"))]
    pub range_variable: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            max_expand_depth: 16,
            alias_separator: String::new(),
            validate_alias_identifiers: true,
            range_variable: "$it".to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            max_expand_depth: parse_env_var("ODATA_TRANSLATOR_MAX_EXPAND_DEPTH", "16")?,
            alias_separator: env::var("ODATA_TRANSLATOR_ALIAS_SEPARATOR").unwrap_or_default(),
            validate_alias_identifiers: parse_env_var(
                "ODATA_TRANSLATOR_VALIDATE_ALIASES",
                "true",
            )?,
            range_variable: env::var("ODATA_TRANSLATOR_RANGE_VARIABLE")
                .unwrap_or_else(|_| "$it".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
