//! Model Context Protocol (MCP) server support
//!
//! This module provides the tool registry, the Linear tool definitions and
//! the `rmcp` server handler that exposes them.

pub mod responses;
pub mod schema;
pub mod server;
pub mod tool_registry;
pub mod tools;

pub use server::{build_registry, McpServer, ServerOptions};
pub use tool_registry::{McpTool, RegistryError, ToolContext, ToolRegistry, ToolSummary};
pub use tools::ToolGroup;
