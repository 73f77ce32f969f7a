//! Unified error handling for the linear-mcp library
//!
//! Each layer owns a typed error (`BackendError`, `RegistryError`,
//! `ConfigError`); this enum gathers the ones server construction can hit.

use crate::linear::BackendError;
use crate::mcp::tool_registry::RegistryError;
use thiserror::Error;

/// The main error type for the linear-mcp library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LinearMcpError {
    /// Tool registration or enabling failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The Linear API client could not be built
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl LinearMcpError {
    /// Whether the error comes from how the server was asked to start
    /// rather than from the environment it runs in
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Registry(_))
    }
}

/// Result type alias for linear-mcp operations
pub type Result<T> = std::result::Result<T, LinearMcpError>;
