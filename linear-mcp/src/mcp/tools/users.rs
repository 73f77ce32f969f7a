//! User tools

use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::issues::LimitRequest;
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all user tools with the registry
pub fn register_user_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetUsersTool)?;
    registry.register(GetUserByIdTool)?;
    registry.register(GetViewerTool)?;
    Ok(())
}

/// Request naming a user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    /// User id
    pub user_id: String,
}

/// Tool for listing users
pub struct GetUsersTool;

#[async_trait]
impl McpTool for GetUsersTool {
    fn name(&self) -> &'static str {
        "getUsers"
    }

    fn description(&self) -> &'static str {
        "Get the users of the Linear workspace"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": limit_property()
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: LimitRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching users",
            context.backend.get_users(request.limit).await,
        )
    }
}

/// Tool for fetching one user
pub struct GetUserByIdTool;

#[async_trait]
impl McpTool for GetUserByIdTool {
    fn name(&self) -> &'static str {
        "getUserById"
    }

    fn description(&self) -> &'static str {
        "Get a Linear user by id"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "User id"
                }
            },
            "required": ["userId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: UserIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching user",
            context.backend.get_user(&request.user_id).await,
        )
    }
}

/// Tool for fetching the user that owns the API key
pub struct GetViewerTool;

#[async_trait]
impl McpTool for GetViewerTool {
    fn name(&self) -> &'static str {
        "getViewer"
    }

    fn description(&self) -> &'static str {
        "Get the Linear user the server is authenticated as"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        _arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        backend_response(
            "Error fetching current user",
            context.backend.get_viewer().await,
        )
    }
}
