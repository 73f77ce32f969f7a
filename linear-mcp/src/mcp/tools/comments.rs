//! Comment tools

use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all comment tools with the registry
pub fn register_comment_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetCommentsTool)?;
    registry.register(CreateCommentTool)?;
    Ok(())
}

/// Request for `getComments`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCommentsRequest {
    /// Issue whose comments to fetch
    pub issue_id: String,
    /// Page size
    #[serde(default = "crate::linear::default_limit")]
    pub limit: u32,
}

/// Request for `createComment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Issue to comment on
    pub issue_id: String,
    /// Markdown body
    pub body: String,
}

/// Tool for listing the comments on an issue
pub struct GetCommentsTool;

#[async_trait]
impl McpTool for GetCommentsTool {
    fn name(&self) -> &'static str {
        "getComments"
    }

    fn description(&self) -> &'static str {
        "Get the comments on a Linear issue"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue id or identifier"
                },
                "limit": limit_property()
            },
            "required": ["issueId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: GetCommentsRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching comments",
            context
                .backend
                .get_comments(&request.issue_id, request.limit)
                .await,
        )
    }
}

/// Tool for commenting on an issue
pub struct CreateCommentTool;

#[async_trait]
impl McpTool for CreateCommentTool {
    fn name(&self) -> &'static str {
        "createComment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to a Linear issue"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue to comment on"
                },
                "body": {
                    "type": "string",
                    "description": "Comment text in markdown"
                }
            },
            "required": ["issueId", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: CreateCommentRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error creating comment",
            context
                .backend
                .create_comment(&request.issue_id, &request.body)
                .await,
        )
    }
}
