//! Registry configuration, loadable from TOML.
//!
//! ```toml
//! table_prefix = "app_"
//! require_primary_key = true
//! auto_field_policy = "reject"
//! ```

use derive_more::Display;
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid registry config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// AutoFieldPolicy
///
/// What the builder does when a host type declares a second auto field.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AutoFieldPolicy {
    /// Fail with `MultipleAutoFields`.
    #[default]
    Reject,

    /// Keep the last declared auto field.
    LastWins,
}

///
/// RegistryConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Prepended to derived table names (explicit overrides are verbatim).
    pub table_prefix: Option<String>,

    /// Reject models that end up without a primary key.
    pub require_primary_key: bool,

    pub auto_field_policy: AutoFieldPolicy,
}

impl RegistryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    #[must_use]
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_require_primary_key(mut self, require: bool) -> Self {
        self.require_primary_key = require;
        self
    }

    #[must_use]
    pub fn with_auto_field_policy(mut self, policy: AutoFieldPolicy) -> Self {
        self.auto_field_policy = policy;
        self
    }

    /// Table name for a host type without an explicit override.
    #[must_use]
    pub fn derived_table(&self, snake_name: &str) -> String {
        match &self.table_prefix {
            Some(prefix) => format!("{prefix}{snake_name}"),
            None => snake_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.auto_field_policy, AutoFieldPolicy::Reject);
    }

    #[test]
    fn parses_all_keys() {
        let config = RegistryConfig::from_toml_str(
            r#"
            table_prefix = "app_"
            require_primary_key = true
            auto_field_policy = "last_wins"
            "#,
        )
        .unwrap();

        assert_eq!(config.table_prefix.as_deref(), Some("app_"));
        assert!(config.require_primary_key);
        assert_eq!(config.auto_field_policy, AutoFieldPolicy::LastWins);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = RegistryConfig::from_toml_str("tables = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn derived_table_applies_prefix() {
        let config = RegistryConfig::new().with_table_prefix("app_");
        assert_eq!(config.derived_table("user"), "app_user");
        assert_eq!(RegistryConfig::new().derived_table("user"), "user");
    }
}
