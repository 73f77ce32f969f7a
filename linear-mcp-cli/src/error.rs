//! Error handling for the linear-mcp CLI
//!
//! Errors keep their source chain and carry the exit code the process
//! should end with.

use crate::exit_codes::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use linear_mcp::LinearMcpError;
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        // The first source is the error the message was taken from
        let mut current = self.source().and_then(Error::source);
        while let Some(err) = current {
            result.push_str(&format!("\n  Caused by: {err}"));
            current = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    /// Map the error to a configuration or usage error
    fn cli_usage_error(self) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_usage_error(self) -> CliResult<T> {
        self.map_err(|e| CliError::from_error(e, EXIT_USAGE))
    }
}

impl From<LinearMcpError> for CliError {
    fn from(error: LinearMcpError) -> Self {
        let exit_code = if error.is_usage_error() {
            EXIT_USAGE
        } else {
            EXIT_FAILURE
        };
        CliError::from_error(error, exit_code)
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linear_mcp::{BackendError, ConfigError, RegistryError};

    #[test]
    fn test_usage_error_keeps_message_and_code() {
        let result: Result<(), ConfigError> = Err(ConfigError::Missing {
            name: "LINEAR_API_KEY".to_string(),
        });
        let err = result.cli_usage_error().unwrap_err();

        assert_eq!(err.exit_code, EXIT_USAGE);
        assert_eq!(err.full_chain(), "LINEAR_API_KEY is required but was not set");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_handle_cli_result_exit_codes() {
        assert_eq!(handle_cli_result(Ok(())), EXIT_SUCCESS);
        assert_eq!(
            handle_cli_result::<()>(Err(CliError::new("boom", EXIT_FAILURE))),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_library_errors_pick_exit_code() {
        let usage: CliError =
            LinearMcpError::from(RegistryError::NotFound("frobnicate".to_string())).into();
        assert_eq!(usage.exit_code, EXIT_USAGE);
        assert_eq!(usage.full_chain(), "Tool 'frobnicate' not found");

        let failure: CliError =
            LinearMcpError::from(BackendError::Other("no TLS backend".to_string())).into();
        assert_eq!(failure.exit_code, EXIT_FAILURE);
    }
}
