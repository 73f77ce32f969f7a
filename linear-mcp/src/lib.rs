//! # linear-mcp
//!
//! Linear project-tracking tools served over the Model Context Protocol.
//!
//! ## Features
//!
//! - **Tool Registry**: named, schema-validated tools with runtime enable/disable gating
//! - **Linear Client**: GraphQL access to issues, projects, cycles, roadmaps and more
//! - **MCP Support**: an `rmcp` server handler ready to serve over stdio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linear_mcp::{build_registry, Config, LinearClient, McpServer, ServerOptions};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let backend = Arc::new(LinearClient::new(config.linear.clone())?);
//! let registry = build_registry(&ServerOptions::default())?;
//! let server = McpServer::new(registry, backend, config.server.clone());
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared utilities
pub mod common;

/// Runtime configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Linear API access
pub mod linear;

/// Model Context Protocol (MCP) server support
pub mod mcp;

pub use config::{Config, ConfigError, LogLevel, ServerConfig};
pub use error::{LinearMcpError, Result};
pub use linear::{BackendError, LinearBackend, LinearClient, LinearClientConfig};
pub use mcp::{
    build_registry, McpServer, McpTool, RegistryError, ServerOptions, ToolContext, ToolGroup,
    ToolRegistry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Test utilities module for testing support
#[doc(hidden)]
pub mod test_utils;
