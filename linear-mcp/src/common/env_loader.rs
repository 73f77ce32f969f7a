//! Environment variable loading utilities
//!
//! This module provides common patterns for loading environment variables
//! with type conversion and fallback defaults.

use std::env;
use std::str::FromStr;

/// Load an environment variable with a string default
pub fn load_env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load an environment variable, treating unset and blank values as absent
pub fn load_env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load an environment variable as an Option<T>, reporting unparseable values
///
/// Returns `Ok(None)` when the variable is unset and `Err(raw)` with the raw
/// value when it is set but does not parse.
pub fn load_env_parsed_strict<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    match load_env_non_empty(key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| raw),
    }
}

/// Load a comma separated list, dropping blank entries
pub fn load_env_list(key: &str) -> Option<Vec<String>> {
    load_env_non_empty(key).map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Builder for loading multiple environment variables with consistent prefix
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        load_env_string(&self.key(suffix), default)
    }

    /// Load a non-empty value
    pub fn load_non_empty(&self, suffix: &str) -> Option<String> {
        load_env_non_empty(&self.key(suffix))
    }

    /// Load a parsed value, reporting the raw text when it does not parse
    pub fn load_parsed_strict<T>(&self, suffix: &str) -> Result<Option<T>, String>
    where
        T: FromStr,
    {
        load_env_parsed_strict(&self.key(suffix))
    }

    /// Load a comma separated list
    pub fn load_list(&self, suffix: &str) -> Option<Vec<String>> {
        load_env_list(&self.key(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_env_string() {
        let key = "LINEAR_MCP_TEST_STRING_VAR";
        let default = "default_value";

        env::remove_var(key);
        assert_eq!(load_env_string(key, default), default);

        env::set_var(key, "test_value");
        assert_eq!(load_env_string(key, default), "test_value");

        env::remove_var(key);
    }

    #[test]
    #[serial]
    fn test_load_env_non_empty_ignores_blank() {
        let key = "LINEAR_MCP_TEST_BLANK_VAR";

        env::set_var(key, "   ");
        assert_eq!(load_env_non_empty(key), None);

        env::set_var(key, " value ");
        assert_eq!(load_env_non_empty(key), Some("value".to_string()));

        env::remove_var(key);
    }

    #[test]
    #[serial]
    fn test_load_env_parsed_strict() {
        let key = "LINEAR_MCP_TEST_PARSED_VAR";

        env::remove_var(key);
        assert_eq!(load_env_parsed_strict::<u64>(key), Ok(None));

        env::set_var(key, "42");
        assert_eq!(load_env_parsed_strict::<u64>(key), Ok(Some(42)));

        env::set_var(key, "forty-two");
        assert_eq!(
            load_env_parsed_strict::<u64>(key),
            Err("forty-two".to_string())
        );

        env::remove_var(key);
    }

    #[test]
    #[serial]
    fn test_env_loader_prefix_and_list() {
        let loader = EnvLoader::new("LINEAR_MCP_TEST");
        assert_eq!(loader.key("TOOLS"), "LINEAR_MCP_TEST_TOOLS");

        env::set_var("LINEAR_MCP_TEST_TOOLS", "issues, comments,,labels ");
        assert_eq!(
            loader.load_list("TOOLS"),
            Some(vec![
                "issues".to_string(),
                "comments".to_string(),
                "labels".to_string()
            ])
        );

        env::remove_var("LINEAR_MCP_TEST_TOOLS");
        assert_eq!(loader.load_list("TOOLS"), None);
    }
}
