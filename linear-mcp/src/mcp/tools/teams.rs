//! Team tools

use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all team tools with the registry
pub fn register_team_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetTeamsTool)?;
    registry.register(GetTeamByIdTool)?;
    registry.register(GetTeamMembersTool)?;
    Ok(())
}

/// Request for `getTeamById`
#[derive(Debug, Deserialize)]
pub struct TeamByIdRequest {
    /// Team id
    pub id: String,
}

/// Request for `getTeamMembers`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersRequest {
    /// Team id
    pub team_id: String,
}

/// Tool for listing teams
pub struct GetTeamsTool;

#[async_trait]
impl McpTool for GetTeamsTool {
    fn name(&self) -> &'static str {
        "getTeams"
    }

    fn description(&self) -> &'static str {
        "Get all teams in the Linear workspace"
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
        backend_response("Error fetching teams", context.backend.get_teams().await)
    }
}

/// Tool for fetching one team
pub struct GetTeamByIdTool;

#[async_trait]
impl McpTool for GetTeamByIdTool {
    fn name(&self) -> &'static str {
        "getTeamById"
    }

    fn description(&self) -> &'static str {
        "Get a Linear team by id, including its members"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Team id"
                }
            },
            "required": ["id"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: TeamByIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching team",
            context.backend.get_team(&request.id).await,
        )
    }
}

/// Tool for listing the members of a team
pub struct GetTeamMembersTool;

#[async_trait]
impl McpTool for GetTeamMembersTool {
    fn name(&self) -> &'static str {
        "getTeamMembers"
    }

    fn description(&self) -> &'static str {
        "Get the members of a Linear team"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "teamId": {
                    "type": "string",
                    "description": "Team id"
                }
            },
            "required": ["teamId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: TeamMembersRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching team members",
            context.backend.get_team_members(&request.team_id).await,
        )
    }
}
