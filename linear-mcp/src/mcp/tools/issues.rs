//! Issue tools
//!
//! Lookup, search, creation and mutation of Linear issues.

use crate::linear::{
    BackendError, CreateIssueParams, LinearBackend, SearchIssuesParams, UpdateIssueParams,
};
use crate::mcp::responses::{backend_response, create_backend_error_response, create_json_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Highest priority value Linear accepts (4 = low)
pub const MAX_PRIORITY: u8 = 4;

/// Register all issue tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetIssueTool)?;
    registry.register(GetIssuesTool)?;
    registry.register(SearchIssuesTool)?;
    registry.register(CreateIssueTool)?;
    registry.register(CreateIssueBatchTool)?;
    registry.register(UpdateIssueTool)?;
    registry.register(DeleteIssueTool)?;
    registry.register(AssignIssueTool)?;
    registry.register(SetIssuePriorityTool)?;
    Ok(())
}

/// Request naming a single issue
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueIdRequest {
    /// Issue id or identifier
    pub issue_id: String,
}

/// Request for a page of results
#[derive(Debug, Deserialize, Serialize)]
pub struct LimitRequest {
    /// Page size
    #[serde(default = "crate::linear::default_limit")]
    pub limit: u32,
}

/// Request for `createIssueBatch`
#[derive(Debug, Deserialize)]
pub struct CreateIssueBatchRequest {
    /// Issues to create, in order
    pub issues: Vec<CreateIssueParams>,
}

/// Request for `updateIssue`
#[derive(Debug, Deserialize)]
pub struct UpdateIssueRequest {
    /// Issue to update
    pub id: String,
    /// Fields to change
    #[serde(flatten)]
    pub changes: UpdateIssueParams,
}

/// Request for `assignIssue`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignIssueRequest {
    /// Issue to assign
    pub issue_id: String,
    /// New assignee; `None` unassigns
    #[serde(default)]
    pub assignee_id: Option<String>,
}

/// Request for `setIssuePriority`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIssuePriorityRequest {
    /// Issue to update
    pub issue_id: String,
    /// Priority, 0 (none) to 4 (low)
    pub priority: u8,
}

/// Fill in the team of an issue without one, using the first team
async fn with_team(
    backend: &dyn LinearBackend,
    mut params: CreateIssueParams,
) -> Result<CreateIssueParams, BackendError> {
    if params.team_id.is_none() {
        let teams = backend.get_teams().await?;
        let team = teams.into_iter().next().ok_or_else(|| {
            BackendError::Other("no team available to create the issue in".to_string())
        })?;
        tracing::debug!("No team given, using {} ({})", team.name, team.id);
        params.team_id = Some(team.id);
    }
    Ok(params)
}

/// Tool for fetching a single issue
pub struct GetIssueTool;

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "getIssue"
    }

    fn description(&self) -> &'static str {
        "Get a Linear issue by its id or identifier (e.g. ENG-123)"
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
        let request: IssueIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching issue",
            context.backend.get_issue(&request.issue_id).await,
        )
    }
}

/// Tool for listing recent issues
pub struct GetIssuesTool;

#[async_trait]
impl McpTool for GetIssuesTool {
    fn name(&self) -> &'static str {
        "getIssues"
    }

    fn description(&self) -> &'static str {
        "Get a list of recent Linear issues"
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
            "Error fetching issues",
            context.backend.get_issues(request.limit).await,
        )
    }
}

/// Tool for searching issues
pub struct SearchIssuesTool;

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "searchIssues"
    }

    fn description(&self) -> &'static str {
        "Search Linear issues by text in the title or description, optionally filtered by team, state, assignee and labels"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "teamId": {
                    "type": "string",
                    "description": "Only issues of this team"
                },
                "stateId": {
                    "type": "string",
                    "description": "Only issues in this workflow state"
                },
                "assigneeId": {
                    "type": "string",
                    "description": "Only issues assigned to this user"
                },
                "labelIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Only issues carrying any of these labels"
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
        let params: SearchIssuesParams = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error searching issues",
            context.backend.search_issues(&params).await,
        )
    }
}

fn create_issue_properties() -> Value {
    json!({
        "title": {
            "type": "string",
            "description": "Issue title"
        },
        "description": {
            "type": "string",
            "description": "Issue description in markdown"
        },
        "teamId": {
            "type": "string",
            "description": "Team to create the issue in; defaults to the first team"
        },
        "assigneeId": {
            "type": "string",
            "description": "User to assign the issue to"
        },
        "stateId": {
            "type": "string",
            "description": "Initial workflow state"
        },
        "priority": {
            "type": "integer",
            "minimum": 0,
            "maximum": MAX_PRIORITY,
            "description": "Priority: 0 none, 1 urgent, 2 high, 3 medium, 4 low"
        },
        "estimate": {
            "type": "number",
            "description": "Estimate points"
        },
        "labelIds": {
            "type": "array",
            "items": { "type": "string" },
            "description": "Labels to attach"
        },
        "projectId": {
            "type": "string",
            "description": "Project to file the issue under"
        },
        "cycleId": {
            "type": "string",
            "description": "Cycle to schedule the issue in"
        }
    })
}

/// Tool for creating an issue
pub struct CreateIssueTool;

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "createIssue"
    }

    fn description(&self) -> &'static str {
        "Create a new Linear issue"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": create_issue_properties(),
            "required": ["title"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        const ACTION: &str = "Error creating issue";
        let params: CreateIssueParams = BaseToolImpl::parse_arguments(arguments)?;

        let params = match with_team(context.backend, params).await {
            Ok(params) => params,
            Err(e) => return Ok(create_backend_error_response(ACTION, &e)),
        };

        let result = context.backend.create_issue(&params).await;
        if let Ok(issue) = &result {
            tracing::info!("Created issue {}", issue.identifier.as_deref().unwrap_or(&issue.id));
        }
        backend_response(ACTION, result)
    }
}

/// Tool for creating several issues in one call
pub struct CreateIssueBatchTool;

#[async_trait]
impl McpTool for CreateIssueBatchTool {
    fn name(&self) -> &'static str {
        "createIssueBatch"
    }

    fn description(&self) -> &'static str {
        "Create several Linear issues in order; stops at the first failure"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": create_issue_properties(),
                        "required": ["title"]
                    },
                    "description": "Issues to create"
                }
            },
            "required": ["issues"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        const ACTION: &str = "Error creating issues in batch";
        let request: CreateIssueBatchRequest = BaseToolImpl::parse_arguments(arguments)?;

        let mut created = Vec::with_capacity(request.issues.len());
        for params in request.issues {
            let result = match with_team(context.backend, params).await {
                Ok(params) => context.backend.create_issue(&params).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(issue) => created.push(issue),
                Err(e) => return Ok(create_backend_error_response(ACTION, &e)),
            }
        }

        tracing::info!("Created {} issues in batch", created.len());
        create_json_response(&created)
    }
}

/// Tool for updating an issue
pub struct UpdateIssueTool;

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "updateIssue"
    }

    fn description(&self) -> &'static str {
        "Update an existing Linear issue; only the supplied fields change"
    }

    fn schema(&self) -> Value {
        let mut properties = create_issue_properties();
        if let Some(map) = properties.as_object_mut() {
            map.insert(
                "id".to_string(),
                json!({ "type": "string", "description": "Issue to update" }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": ["id"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error updating issue",
            context
                .backend
                .update_issue(&request.id, &request.changes)
                .await,
        )
    }
}

#[derive(Serialize)]
struct DeleteIssueResponse {
    success: bool,
}

/// Tool for deleting an issue
pub struct DeleteIssueTool;

#[async_trait]
impl McpTool for DeleteIssueTool {
    fn name(&self) -> &'static str {
        "deleteIssue"
    }

    fn description(&self) -> &'static str {
        "Delete a Linear issue"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue to delete"
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
        let request: IssueIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .backend
            .delete_issue(&request.issue_id)
            .await
            .map(|success| DeleteIssueResponse { success });
        backend_response("Error deleting issue", result)
    }
}

/// Tool for assigning or unassigning an issue
pub struct AssignIssueTool;

#[async_trait]
impl McpTool for AssignIssueTool {
    fn name(&self) -> &'static str {
        "assignIssue"
    }

    fn description(&self) -> &'static str {
        "Assign a Linear issue to a user, or unassign it by passing null"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue to assign"
                },
                "assigneeId": {
                    "type": ["string", "null"],
                    "description": "User to assign, or null to unassign"
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
        let request: AssignIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error assigning issue",
            context
                .backend
                .assign_issue(&request.issue_id, request.assignee_id.as_deref())
                .await,
        )
    }
}

/// Tool for changing the priority of an issue
pub struct SetIssuePriorityTool;

#[async_trait]
impl McpTool for SetIssuePriorityTool {
    fn name(&self) -> &'static str {
        "setIssuePriority"
    }

    fn description(&self) -> &'static str {
        "Set the priority of a Linear issue (0 none, 1 urgent, 2 high, 3 medium, 4 low)"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue to update"
                },
                "priority": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_PRIORITY,
                    "description": "Priority from 0 to 4"
                }
            },
            "required": ["issueId", "priority"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        const ACTION: &str = "Error setting issue priority";
        let request: SetIssuePriorityRequest = BaseToolImpl::parse_arguments(arguments)?;

        if request.priority > MAX_PRIORITY {
            return Ok(BaseToolImpl::create_error_response(
                ACTION,
                Some(format!("priority must be between 0 and {MAX_PRIORITY}")),
            ));
        }

        let changes = UpdateIssueParams {
            priority: Some(request.priority),
            ..Default::default()
        };
        backend_response(
            ACTION,
            context
                .backend
                .update_issue(&request.issue_id, &changes)
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
        register_issue_tools(&mut registry).unwrap();
        registry
    }

    fn args(value: Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn test_get_issue_returns_pretty_json() {
        let backend = MockLinearBackend::new();
        backend.respond("get_issue", json!({"id": "1", "title": "Test"}));

        let result = registry()
            .dispatch("getIssue", args(json!({"issueId": "ABC-1"})), &backend)
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(response_text(&result), "{\n  \"id\": \"1\",\n  \"title\": \"Test\"\n}");
        assert_eq!(backend.calls_to("get_issue"), vec![json!({"id": "ABC-1"})]);
    }

    #[tokio::test]
    async fn test_get_issues_defaults_limit() {
        let backend = MockLinearBackend::new();
        backend.respond("get_issues", json!([]));

        let result = registry().dispatch("getIssues", None, &backend).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(backend.calls_to("get_issues"), vec![json!({"limit": 25})]);
    }

    #[tokio::test]
    async fn test_create_issue_passes_supplied_fields_only() {
        let backend = MockLinearBackend::new();
        backend.respond("create_issue", json!({"id": "2", "title": "New"}));

        let result = registry()
            .dispatch(
                "createIssue",
                args(json!({"title": "New", "teamId": "t1", "priority": 2})),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            backend.calls_to("create_issue"),
            vec![json!({"title": "New", "teamId": "t1", "priority": 2})]
        );
        assert!(backend.calls_to("get_teams").is_empty());
    }

    #[tokio::test]
    async fn test_create_issue_defaults_to_first_team() {
        let backend = MockLinearBackend::new();
        backend.respond(
            "get_teams",
            json!([{"id": "t9", "name": "Core"}, {"id": "t2", "name": "Other"}]),
        );
        backend.respond("create_issue", json!({"id": "2", "title": "New"}));

        registry()
            .dispatch("createIssue", args(json!({"title": "New"})), &backend)
            .await;

        assert_eq!(
            backend.calls_to("create_issue"),
            vec![json!({"title": "New", "teamId": "t9"})]
        );
    }

    #[tokio::test]
    async fn test_create_issue_without_teams_fails() {
        let backend = MockLinearBackend::new();
        backend.respond("get_teams", json!([]));

        let result = registry()
            .dispatch("createIssue", args(json!({"title": "New"})), &backend)
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            response_text(&result),
            "Error creating issue: no team available to create the issue in"
        );
        assert!(backend.calls_to("create_issue").is_empty());
    }

    #[tokio::test]
    async fn test_batch_stops_at_first_failure() {
        let backend = MockLinearBackend::new();
        backend.respond_sequence(
            "create_issue",
            vec![
                Ok(json!({"id": "1", "title": "a"})),
                Err("Linear GraphQL error: boom".to_string()),
            ],
        );

        let result = registry()
            .dispatch(
                "createIssueBatch",
                args(json!({"issues": [
                    {"title": "a", "teamId": "t"},
                    {"title": "b", "teamId": "t"},
                    {"title": "c", "teamId": "t"}
                ]})),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(response_text(&result).starts_with("Error creating issues in batch: "));
        assert_eq!(backend.calls_to("create_issue").len(), 2);
    }

    #[tokio::test]
    async fn test_batch_accepts_stringified_array() {
        let backend = MockLinearBackend::new();
        backend.respond("create_issue", json!({"id": "1", "title": "a"}));

        let result = registry()
            .dispatch(
                "createIssueBatch",
                args(json!({"issues": "[{\"title\": \"a\", \"teamId\": \"t\"}]"})),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert!(response_text(&result).starts_with('['));
    }

    #[tokio::test]
    async fn test_update_issue_splits_id_from_changes() {
        let backend = MockLinearBackend::new();
        backend.respond("update_issue", json!({"id": "1", "title": "Renamed"}));

        registry()
            .dispatch(
                "updateIssue",
                args(json!({"id": "1", "title": "Renamed"})),
                &backend,
            )
            .await;

        assert_eq!(
            backend.calls_to("update_issue"),
            vec![json!({"id": "1", "changes": {"title": "Renamed"}})]
        );
    }

    #[tokio::test]
    async fn test_delete_issue_reports_success_flag() {
        let backend = MockLinearBackend::new();
        backend.respond("delete_issue", json!(true));

        let result = registry()
            .dispatch("deleteIssue", args(json!({"issueId": "1"})), &backend)
            .await;

        assert_eq!(response_text(&result), "{\n  \"success\": true\n}");
    }

    #[tokio::test]
    async fn test_assign_issue_null_unassigns() {
        let backend = MockLinearBackend::new();
        backend.respond("assign_issue", json!({"id": "1", "title": "x"}));

        registry()
            .dispatch(
                "assignIssue",
                args(json!({"issueId": "1", "assigneeId": null})),
                &backend,
            )
            .await;

        assert_eq!(
            backend.calls_to("assign_issue"),
            vec![json!({"issueId": "1", "assigneeId": null})]
        );
    }

    #[tokio::test]
    async fn test_set_priority_out_of_range() {
        let backend = MockLinearBackend::new();

        for priority in [json!(7), json!(-1)] {
            let result = registry()
                .dispatch(
                    "setIssuePriority",
                    args(json!({"issueId": "1", "priority": priority})),
                    &backend,
                )
                .await;

            assert_eq!(result.is_error, Some(true));
            assert_eq!(
                response_text(&result),
                "Invalid arguments for tool 'setIssuePriority': priority: must be between 0 and 4"
            );
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_set_priority_handler_checks_range() {
        let backend = MockLinearBackend::new();
        let registry = registry();
        let context = ToolContext::new(&backend, &registry);

        let result = SetIssuePriorityTool
            .execute(
                json!({"issueId": "1", "priority": 9})
                    .as_object()
                    .cloned()
                    .unwrap(),
                &context,
            )
            .await
            .unwrap();

        assert_eq!(
            response_text(&result),
            "Error setting issue priority: priority must be between 0 and 4"
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_limit_must_be_a_non_negative_integer() {
        let backend = MockLinearBackend::new();

        for (limit, problem) in [
            (json!(2.5), "limit: expected integer, got number"),
            (json!(-1), "limit: must be at least 0"),
        ] {
            let result = registry()
                .dispatch("getIssues", args(json!({"limit": limit})), &backend)
                .await;

            assert_eq!(result.is_error, Some(true));
            assert_eq!(
                response_text(&result),
                format!("Invalid arguments for tool 'getIssues': {problem}")
            );
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_items_are_validated() {
        let backend = MockLinearBackend::new();

        let result = registry()
            .dispatch(
                "createIssueBatch",
                args(json!({"issues": [
                    {"title": "a", "teamId": "t"},
                    {"description": "no title"},
                    {"title": 5}
                ]})),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        let text = response_text(&result);
        assert!(text.starts_with("Invalid arguments for tool 'createIssueBatch': "));
        assert!(text.contains("issues[1].title: is required"));
        assert!(text.contains("issues[2].title: expected string, got number"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_is_prefixed() {
        let backend = MockLinearBackend::new();
        backend.fail("get_issue", "Linear API error: 401 Unauthorized");

        let result = registry()
            .dispatch("getIssue", args(json!({"issueId": "1"})), &backend)
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            response_text(&result),
            "Error fetching issue: Linear API error: 401 Unauthorized"
        );
    }
}
