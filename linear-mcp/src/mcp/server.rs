//! MCP server implementation for serving Linear tools

use crate::config::{Config, ServerConfig};
use crate::linear::{LinearBackend, LinearClient};
use crate::mcp::tool_registry::{RegistryError, ToolRegistry};
use crate::mcp::tools::meta::{register_meta_tools, ENABLE_TOOL, LIST_TOOLS};
use crate::mcp::tools::{register_group, ToolGroup};
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::collections::HashSet;
use std::sync::Arc;

const INSTRUCTIONS: &str = "Tools for the Linear project-tracking API. Most tools start \
disabled: call listTools to see the full catalog and enableTool to switch on the ones \
you need before calling them.";

/// Which tools a server registers and which start enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Tool groups to register
    pub groups: Vec<ToolGroup>,
    /// Tools to re-enable after the domain tools are switched off
    pub enable: Vec<String>,
    /// Leave every registered tool enabled
    pub enable_all: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            groups: ToolGroup::ALL.to_vec(),
            enable: Vec::new(),
            enable_all: false,
        }
    }
}

/// Build the registry for a server.
///
/// The meta tools are registered first and always stay enabled. Every tool
/// of the selected groups is registered next and then switched off unless
/// `enable_all` is set, after which the tools named in `enable` are switched
/// back on. Naming an unregistered tool in `enable` is an error.
pub fn build_registry(options: &ServerOptions) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    register_meta_tools(&mut registry)?;

    let mut seen = HashSet::new();
    for group in &options.groups {
        if seen.insert(*group) {
            register_group(&mut registry, *group)?;
        }
    }

    if !options.enable_all {
        let domain_tools: Vec<&str> = registry
            .tool_names()
            .into_iter()
            .filter(|name| *name != LIST_TOOLS && *name != ENABLE_TOOL)
            .collect();
        registry.set_group_enabled(&domain_tools, false)?;
    }
    registry.set_group_enabled(&options.enable, true)?;

    tracing::info!(
        "Registered {} tools ({} enabled)",
        registry.len(),
        registry.mcp_tools().len()
    );
    Ok(registry)
}

/// MCP server exposing a [`ToolRegistry`] over a [`LinearBackend`]
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    backend: Arc<dyn LinearBackend>,
    server: ServerConfig,
}

impl McpServer {
    /// Create a server from a finished registry.
    ///
    /// Registry membership is fixed from here on; only the enabled flags
    /// can still change.
    pub fn new(
        registry: ToolRegistry,
        backend: Arc<dyn LinearBackend>,
        server: ServerConfig,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            backend,
            server,
        }
    }

    /// Build the registry and a Linear API client from loaded configuration
    pub fn from_config(config: &Config, options: &ServerOptions) -> crate::Result<Self> {
        let registry = build_registry(options)?;
        let backend = LinearClient::new(config.linear.clone())?;
        tracing::debug!("Linear client: {:?}", backend.config());
        Ok(Self::new(registry, Arc::new(backend), config.server.clone()))
    }

    /// The registry served by this server
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );
        Ok(self.get_info())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.mcp_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let revision = self.registry.revision();
        let result = self
            .registry
            .dispatch(&request.name, request.arguments, self.backend.as_ref())
            .await;

        if self.registry.revision() != revision {
            if let Err(e) = context.peer.notify_tool_list_changed().await {
                tracing::warn!("Failed to send tools/list_changed notification: {}", e);
            }
        }
        Ok(result)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                tools: Some(ToolsCapability {
                    list_changed: Some(true),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: self.server.name.clone(),
                version: self.server.version.clone(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
