//! Configuration management for linear-mcp
//!
//! Configuration is read once at startup from the process environment. The
//! library itself never consults the environment after this point: the
//! resulting [`Config`] is used to build the Linear client and the server.

use crate::common::env_loader::{load_env_non_empty, load_env_string, EnvLoader};
use crate::linear::LinearClientConfig;
use crate::mcp::tools::ToolGroup;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default Linear GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";
/// Default server name reported to MCP clients
pub const DEFAULT_SERVER_NAME: &str = "linear-mcp";
/// Default server version reported to MCP clients
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";
/// Default per-request timeout for Linear API calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{name} is required but was not set")]
    Missing {
        /// Name of the environment variable
        name: String,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field that has an invalid value
        field: String,
        /// The invalid value that was provided
        value: String,
        /// Helpful hint about how to fix the issue
        hint: String,
    },
}

/// Log verbosity accepted through `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Debug and above
    Debug,
    /// Info and above
    #[default]
    Info,
    /// Warnings and errors
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Server identity reported during the MCP handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: DEFAULT_SERVER_VERSION.to_string(),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Linear API access
    pub linear: LinearClientConfig,
    /// MCP server identity
    pub server: ServerConfig,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Tool groups selected through `LINEAR_MCP_TOOLS`, `None` meaning all
    pub tool_groups: Option<Vec<ToolGroup>>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Recognised variables:
    /// - `LINEAR_API_KEY` (required)
    /// - `LINEAR_API_URL` (default [`DEFAULT_API_URL`])
    /// - `LINEAR_REQUEST_TIMEOUT_SECS` (default [`DEFAULT_REQUEST_TIMEOUT_SECS`])
    /// - `SERVER_NAME`, `SERVER_VERSION`, `LOG_LEVEL`
    /// - `LINEAR_MCP_TOOLS` (comma separated tool groups)
    pub fn from_env() -> Result<Self, ConfigError> {
        let linear = EnvLoader::new("LINEAR");

        let api_key = linear
            .load_non_empty("API_KEY")
            .ok_or_else(|| ConfigError::Missing {
                name: linear.key("API_KEY"),
            })?;

        let base_url = parse_api_url(&linear.load_string("API_URL", DEFAULT_API_URL))?;

        let timeout_secs = linear
            .load_parsed_strict::<u64>("REQUEST_TIMEOUT_SECS")
            .map_err(|raw| invalid_timeout(&raw))?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(invalid_timeout("0"));
        }

        let log_level = log_level_from_env()?;
        let tool_groups = tool_groups_from_env()?;

        Ok(Self {
            linear: LinearClientConfig {
                api_key,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            server: ServerConfig {
                name: load_env_string("SERVER_NAME", DEFAULT_SERVER_NAME),
                version: load_env_string("SERVER_VERSION", DEFAULT_SERVER_VERSION),
            },
            log_level,
            tool_groups,
        })
    }
}

/// Read `LOG_LEVEL`, defaulting to [`LogLevel::Info`]
///
/// Available on its own so logging can be set up before the rest of the
/// configuration is loaded.
pub fn log_level_from_env() -> Result<LogLevel, ConfigError> {
    match load_env_non_empty("LOG_LEVEL") {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: "LOG_LEVEL".to_string(),
            value: raw.clone(),
            hint: "Expected one of: debug, info, warn, error".to_string(),
        }),
        None => Ok(LogLevel::default()),
    }
}

/// Read the tool groups selected through `LINEAR_MCP_TOOLS`, `None` meaning all
pub fn tool_groups_from_env() -> Result<Option<Vec<ToolGroup>>, ConfigError> {
    match EnvLoader::new("LINEAR_MCP").load_list("TOOLS") {
        Some(names) => parse_tool_groups(&names).map(Some),
        None => Ok(None),
    }
}

/// Parse and check the GraphQL endpoint URL
pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let invalid = |hint: &str| ConfigError::InvalidValue {
        field: "LINEAR_API_URL".to_string(),
        value: raw.to_string(),
        hint: hint.to_string(),
    };

    let url = url::Url::parse(raw).map_err(|e| invalid(&format!("Not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(invalid("The URL scheme must be http or https")),
    }
}

/// Parse tool group names, rejecting unknown ones
pub fn parse_tool_groups(names: &[String]) -> Result<Vec<ToolGroup>, ConfigError> {
    names
        .iter()
        .map(|name| {
            name.parse::<ToolGroup>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "LINEAR_MCP_TOOLS".to_string(),
                    value: name.clone(),
                    hint: e,
                })
        })
        .collect()
}

fn invalid_timeout(raw: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: "LINEAR_REQUEST_TIMEOUT_SECS".to_string(),
        value: raw.to_string(),
        hint: "Expected a positive number of seconds".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 7] = [
        "LINEAR_API_KEY",
        "LINEAR_API_URL",
        "LINEAR_REQUEST_TIMEOUT_SECS",
        "SERVER_NAME",
        "SERVER_VERSION",
        "LOG_LEVEL",
        "LINEAR_MCP_TOOLS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_an_error() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref name } if name == "LINEAR_API_KEY"));
        assert!(err.to_string().contains("LINEAR_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_defaults_applied() {
        clear_env();
        env::set_var("LINEAR_API_KEY", "lin_api_test");

        let config = Config::from_env().unwrap();
        assert_eq!(config.linear.api_key, "lin_api_test");
        assert_eq!(config.linear.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(
            config.linear.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.tool_groups.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_applied() {
        clear_env();
        env::set_var("LINEAR_API_KEY", "lin_api_test");
        env::set_var("LINEAR_API_URL", "http://localhost:4000/graphql");
        env::set_var("LINEAR_REQUEST_TIMEOUT_SECS", "5");
        env::set_var("SERVER_NAME", "tracker");
        env::set_var("SERVER_VERSION", "2.0.0");
        env::set_var("LOG_LEVEL", "DEBUG");
        env::set_var("LINEAR_MCP_TOOLS", "issues,comments");

        let config = Config::from_env().unwrap();
        assert_eq!(config.linear.base_url.as_str(), "http://localhost:4000/graphql");
        assert_eq!(config.linear.timeout, Duration::from_secs(5));
        assert_eq!(config.server.name, "tracker");
        assert_eq!(config.server.version, "2.0.0");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.tool_groups,
            Some(vec![ToolGroup::Issues, ToolGroup::Comments])
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        clear_env();
        env::set_var("LINEAR_API_KEY", "lin_api_test");

        env::set_var("LINEAR_REQUEST_TIMEOUT_SECS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "LINEAR_REQUEST_TIMEOUT_SECS"
        ));
        env::remove_var("LINEAR_REQUEST_TIMEOUT_SECS");

        env::set_var("LOG_LEVEL", "chatty");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "LOG_LEVEL"
        ));
        env::remove_var("LOG_LEVEL");

        env::set_var("LINEAR_MCP_TOOLS", "issues,gadgets");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { ref value, .. }) if value == "gadgets"
        ));

        clear_env();
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("ftp://example.com/graphql").is_err());
        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("https://api.linear.app/graphql").is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" Error ".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("trace".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }
}
