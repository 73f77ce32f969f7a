//! Cycle tools

use crate::linear::{CreateCycleParams, UpdateCycleParams};
use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all cycle tools with the registry
pub fn register_cycle_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetCyclesTool)?;
    registry.register(GetCycleByIdTool)?;
    registry.register(GetActiveCycleTool)?;
    registry.register(CreateCycleTool)?;
    registry.register(UpdateCycleTool)?;
    registry.register(GetCycleIssuesTool)?;
    registry.register(AddIssueToCycleTool)?;
    registry.register(RemoveIssueFromCycleTool)?;
    Ok(())
}

/// Request for `getCycles`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCyclesRequest {
    /// Restrict to one team
    #[serde(default)]
    pub team_id: Option<String>,
    /// Page size
    #[serde(default = "crate::linear::default_limit")]
    pub limit: u32,
}

/// Request naming a cycle by `id`
#[derive(Debug, Deserialize)]
pub struct CycleIdRequest {
    /// Cycle id
    pub id: String,
}

/// Request naming a team
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCycleRequest {
    /// Team id
    pub team_id: String,
}

/// Request for `updateCycle`
#[derive(Debug, Deserialize)]
pub struct UpdateCycleRequest {
    /// Cycle to update
    pub id: String,
    /// Fields to change
    #[serde(flatten)]
    pub changes: UpdateCycleParams,
}

/// Request for `getCycleIssues`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleIssuesRequest {
    /// Cycle id
    pub cycle_id: String,
    /// Page size
    #[serde(default = "crate::linear::default_limit")]
    pub limit: u32,
}

/// Request for `addIssueToCycle`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIssueToCycleRequest {
    /// Issue to schedule
    pub issue_id: String,
    /// Target cycle
    pub cycle_id: String,
}

/// Request for `removeIssueFromCycle`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveIssueFromCycleRequest {
    /// Issue to unschedule
    pub issue_id: String,
}

/// Tool for listing cycles
pub struct GetCyclesTool;

#[async_trait]
impl McpTool for GetCyclesTool {
    fn name(&self) -> &'static str {
        "getCycles"
    }

    fn description(&self) -> &'static str {
        "Get Linear cycles, optionally for a single team"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "teamId": {
                    "type": "string",
                    "description": "Only cycles of this team"
                },
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
        let request: GetCyclesRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching cycles",
            context
                .backend
                .get_cycles(request.team_id.as_deref(), request.limit)
                .await,
        )
    }
}

/// Tool for fetching one cycle
pub struct GetCycleByIdTool;

#[async_trait]
impl McpTool for GetCycleByIdTool {
    fn name(&self) -> &'static str {
        "getCycleById"
    }

    fn description(&self) -> &'static str {
        "Get a Linear cycle by id"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Cycle id"
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
        let request: CycleIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching cycle",
            context.backend.get_cycle(&request.id).await,
        )
    }
}

/// Tool for fetching a team's running cycle
pub struct GetActiveCycleTool;

#[async_trait]
impl McpTool for GetActiveCycleTool {
    fn name(&self) -> &'static str {
        "getActiveCycle"
    }

    fn description(&self) -> &'static str {
        "Get the currently active cycle of a Linear team"
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
        let request: ActiveCycleRequest = BaseToolImpl::parse_arguments(arguments)?;
        match context.backend.get_active_cycle(&request.team_id).await {
            Ok(None) => Ok(BaseToolImpl::create_success_response(format!(
                "No active cycle found for team {}",
                request.team_id
            ))),
            result => backend_response("Error fetching active cycle", result),
        }
    }
}

/// Tool for creating a cycle
pub struct CreateCycleTool;

#[async_trait]
impl McpTool for CreateCycleTool {
    fn name(&self) -> &'static str {
        "createCycle"
    }

    fn description(&self) -> &'static str {
        "Create a new cycle for a Linear team"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "teamId": {
                    "type": "string",
                    "description": "Team id"
                },
                "startsAt": {
                    "type": "string",
                    "description": "Start timestamp (ISO 8601)"
                },
                "endsAt": {
                    "type": "string",
                    "description": "End timestamp (ISO 8601)"
                },
                "name": {
                    "type": "string",
                    "description": "Cycle name"
                },
                "description": {
                    "type": "string",
                    "description": "Cycle description"
                }
            },
            "required": ["teamId", "startsAt", "endsAt"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let params: CreateCycleParams = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error creating cycle",
            context.backend.create_cycle(&params).await,
        )
    }
}

/// Tool for updating a cycle
pub struct UpdateCycleTool;

#[async_trait]
impl McpTool for UpdateCycleTool {
    fn name(&self) -> &'static str {
        "updateCycle"
    }

    fn description(&self) -> &'static str {
        "Update an existing Linear cycle; only the supplied fields change"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Cycle id"
                },
                "name": {
                    "type": "string",
                    "description": "New name"
                },
                "description": {
                    "type": "string",
                    "description": "New description"
                },
                "startsAt": {
                    "type": "string",
                    "description": "New start timestamp (ISO 8601)"
                },
                "endsAt": {
                    "type": "string",
                    "description": "New end timestamp (ISO 8601)"
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
        let request: UpdateCycleRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error updating cycle",
            context
                .backend
                .update_cycle(&request.id, &request.changes)
                .await,
        )
    }
}

/// Tool for listing the issues of a cycle
pub struct GetCycleIssuesTool;

#[async_trait]
impl McpTool for GetCycleIssuesTool {
    fn name(&self) -> &'static str {
        "getCycleIssues"
    }

    fn description(&self) -> &'static str {
        "Get the issues scheduled in a Linear cycle"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "cycleId": {
                    "type": "string",
                    "description": "Cycle id"
                },
                "limit": limit_property()
            },
            "required": ["cycleId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: CycleIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching cycle issues",
            context
                .backend
                .get_cycle_issues(&request.cycle_id, request.limit)
                .await,
        )
    }
}

/// Tool for scheduling an issue in a cycle
pub struct AddIssueToCycleTool;

#[async_trait]
impl McpTool for AddIssueToCycleTool {
    fn name(&self) -> &'static str {
        "addIssueToCycle"
    }

    fn description(&self) -> &'static str {
        "Add a Linear issue to a cycle"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue id or identifier"
                },
                "cycleId": {
                    "type": "string",
                    "description": "Cycle id"
                }
            },
            "required": ["issueId", "cycleId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: AddIssueToCycleRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error adding issue to cycle",
            context
                .backend
                .add_issue_to_cycle(&request.issue_id, &request.cycle_id)
                .await,
        )
    }
}

/// Tool for taking an issue out of its cycle
pub struct RemoveIssueFromCycleTool;

#[async_trait]
impl McpTool for RemoveIssueFromCycleTool {
    fn name(&self) -> &'static str {
        "removeIssueFromCycle"
    }

    fn description(&self) -> &'static str {
        "Remove a Linear issue from its cycle"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue id or identifier"
                }
            },
            "required": ["issueId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: RemoveIssueFromCycleRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error removing issue from cycle",
            context
                .backend
                .remove_issue_from_cycle(&request.issue_id)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{response_text, MockLinearBackend};

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_cycle_tools(&mut registry).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_no_active_cycle_is_a_success() {
        let backend = MockLinearBackend::new();
        backend.respond("get_active_cycle", Value::Null);

        let result = registry()
            .dispatch(
                "getActiveCycle",
                json!({"teamId": "t1"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(response_text(&result), "No active cycle found for team t1");
    }

    #[tokio::test]
    async fn test_active_cycle_is_returned() {
        let backend = MockLinearBackend::new();
        backend.respond("get_active_cycle", json!({"id": "c1", "number": 12}));

        let result = registry()
            .dispatch(
                "getActiveCycle",
                json!({"teamId": "t1"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert!(response_text(&result).contains("\"number\": 12"));
    }

    #[tokio::test]
    async fn test_get_cycles_without_team() {
        let backend = MockLinearBackend::new();
        backend.respond("get_cycles", json!([]));

        registry().dispatch("getCycles", None, &backend).await;

        assert_eq!(
            backend.calls_to("get_cycles"),
            vec![json!({"teamId": null, "limit": 25})]
        );
    }
}
