//! Tool registry for MCP operations
//!
//! The registry owns every tool of a server instance together with a
//! per-tool enabled flag. Membership is fixed once the registry is shared
//! (registration needs `&mut self`, so wrapping it in an `Arc` freezes it);
//! the flags stay mutable through `&self` and are read on every dispatch.
//!
//! [`ToolRegistry::dispatch`] is the single entry point for tool calls. It
//! never returns an error: lookup, validation, gating and handler failures
//! all come back as a [`CallToolResult`] with `is_error` set.

use super::schema::{validate_arguments, ValidationError};
use crate::linear::LinearBackend;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Per-call context handed to tools by [`ToolRegistry::dispatch`]
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    /// Linear API access
    pub backend: &'a dyn LinearBackend,
    /// The registry dispatching the call, for tools that inspect or change it
    pub registry: &'a ToolRegistry,
}

impl<'a> ToolContext<'a> {
    /// Create a new tool context
    pub fn new(backend: &'a dyn LinearBackend, registry: &'a ToolRegistry) -> Self {
        Self { backend, registry }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> Value;

    /// Execute the tool with validated, normalized arguments
    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Errors raised by registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool was registered with an empty name
    #[error("Tool name must not be empty")]
    EmptyName,

    /// A tool name was registered twice
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// No tool with this name exists
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// The tool exists but is switched off
    #[error("Tool '{0}' is disabled. Use enableTool to enable it.")]
    Disabled(String),

    /// The call arguments violate the tool schema
    #[error("Invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        /// Tool being called
        tool: String,
        /// Field-level problems
        source: ValidationError,
    },
}

/// Name and description of a registered tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    /// Tool name
    pub name: &'static str,
    /// Tool description
    pub description: &'static str,
}

struct ToolEntry {
    tool: Box<dyn McpTool>,
    schema: Value,
    enabled: AtomicBool,
}

impl ToolEntry {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
    revision: AtomicU64,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enabled tool
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.insert(Box::new(tool), true)
    }

    /// Register a tool that starts disabled
    pub fn register_disabled<T: McpTool + 'static>(
        &mut self,
        tool: T,
    ) -> Result<(), RegistryError> {
        self.insert(Box::new(tool), false)
    }

    fn insert(&mut self, tool: Box<dyn McpTool>, enabled: bool) -> Result<(), RegistryError> {
        let name = tool.name();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateTool(name.to_string()));
        }

        tracing::debug!("Registering tool {} (enabled: {})", name, enabled);
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(ToolEntry {
            schema: tool.schema(),
            tool,
            enabled: AtomicBool::new(enabled),
        });
        Ok(())
    }

    fn entry(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.entry(name).map(|entry| entry.tool.as_ref())
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered tool names in registration order
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.tool.name()).collect()
    }

    /// Every registered tool, enabled or not, in registration order
    pub fn list(&self) -> Vec<ToolSummary> {
        self.entries
            .iter()
            .map(|entry| ToolSummary {
                name: entry.tool.name(),
                description: entry.tool.description(),
            })
            .collect()
    }

    /// Enabled flag of a tool, `None` if it is not registered
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.entry(name).map(ToolEntry::is_enabled)
    }

    /// Switch a tool on or off
    ///
    /// Setting a flag to its current value is a no-op. Calls already past
    /// the gate are not affected.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        if entry.enabled.swap(enabled, Ordering::AcqRel) != enabled {
            self.revision.fetch_add(1, Ordering::AcqRel);
            tracing::info!(
                "Tool {} {}",
                name,
                if enabled { "enabled" } else { "disabled" }
            );
        }
        Ok(())
    }

    /// Switch every registered tool on or off
    pub fn set_all_enabled(&self, enabled: bool) {
        let mut changed = false;
        for entry in &self.entries {
            changed |= entry.enabled.swap(enabled, Ordering::AcqRel) != enabled;
        }
        if changed {
            self.revision.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Switch a set of tools on or off, failing on the first unknown name
    ///
    /// Names are checked before any flag changes.
    pub fn set_group_enabled<S: AsRef<str>>(
        &self,
        names: &[S],
        enabled: bool,
    ) -> Result<(), RegistryError> {
        if let Some(missing) = names.iter().find(|name| !self.contains(name.as_ref())) {
            return Err(RegistryError::NotFound(missing.as_ref().to_string()));
        }
        for name in names {
            self.set_enabled(name.as_ref(), enabled)?;
        }
        Ok(())
    }

    /// Counter bumped whenever an enabled flag actually changes
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Enabled tools as MCP `tools/list` entries
    pub fn mcp_tools(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .filter(|entry| entry.is_enabled())
            .map(|entry| {
                let schema_map = match &entry.schema {
                    Value::Object(map) => map.clone(),
                    _ => Map::new(),
                };

                Tool {
                    name: entry.tool.name().into(),
                    description: Some(entry.tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prepare(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<(&dyn McpTool, Map<String, Value>), RegistryError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        let normalized = validate_arguments(&entry.schema, arguments.unwrap_or_default())
            .map_err(|source| RegistryError::InvalidArguments {
                tool: name.to_string(),
                source,
            })?;

        if !entry.is_enabled() {
            return Err(RegistryError::Disabled(name.to_string()));
        }

        Ok((entry.tool.as_ref(), normalized))
    }

    /// Run a tool call end to end
    ///
    /// Failures of any kind are returned as an error result; the backend is
    /// only reached for a known, valid and enabled tool.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
        backend: &dyn LinearBackend,
    ) -> CallToolResult {
        tracing::debug!("Dispatching tool {}", name);

        let (tool, arguments) = match self.prepare(name, arguments) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!("Rejected call to {}: {}", name, e);
                return BaseToolImpl::create_error_response(e.to_string(), None);
            }
        };

        let context = ToolContext::new(backend, self);
        match tool.execute(arguments, &context).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Tool {} failed: {}", name, e.message);
                BaseToolImpl::create_error_response(
                    format!("Error executing tool '{name}'"),
                    Some(e.message.to_string()),
                )
            }
        }
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The normalized argument map
    ///
    /// # Returns
    ///
    /// * `Result<T, McpError>` - The parsed arguments or an error
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: Map<String, Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response with the given text
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create an error response with the given error message
    ///
    /// # Arguments
    ///
    /// * `error` - The error message
    /// * `details` - Optional additional details, appended after a colon
    ///
    /// # Returns
    ///
    /// * `CallToolResult` - An error response
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };

        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: error_text }),
                None,
            )],
            is_error: Some(true),
        }
    }
}
