//! Project tools
//!
//! Projects, the issues filed under them and their status updates.

use crate::linear::{CreateProjectParams, CreateProjectUpdateParams};
use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::issues::LimitRequest;
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Project health values accepted by Linear
pub const PROJECT_HEALTH: [&str; 3] = ["onTrack", "atRisk", "offTrack"];

/// Register all project tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetProjectsTool)?;
    registry.register(GetProjectTool)?;
    registry.register(CreateProjectTool)?;
    registry.register(GetProjectIssuesTool)?;
    registry.register(AddIssueToProjectTool)?;
    registry.register(GetProjectUpdatesTool)?;
    registry.register(CreateProjectUpdateTool)?;
    Ok(())
}

/// Request naming a project
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdRequest {
    /// Project id
    pub project_id: String,
}

/// Request for a page of a project's children
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPageRequest {
    /// Project id
    pub project_id: String,
    /// Page size
    #[serde(default = "crate::linear::default_limit")]
    pub limit: u32,
}

/// Request for `addIssueToProject`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIssueToProjectRequest {
    /// Issue to move
    pub issue_id: String,
    /// Target project
    pub project_id: String,
}

fn project_page_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "projectId": {
                "type": "string",
                "description": "Project id"
            },
            "limit": limit_property()
        },
        "required": ["projectId"]
    })
}

/// Tool for listing projects
pub struct GetProjectsTool;

#[async_trait]
impl McpTool for GetProjectsTool {
    fn name(&self) -> &'static str {
        "getProjects"
    }

    fn description(&self) -> &'static str {
        "Get Linear projects"
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
            "Error fetching projects",
            context.backend.get_projects(request.limit).await,
        )
    }
}

/// Tool for fetching one project
pub struct GetProjectTool;

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "getProject"
    }

    fn description(&self) -> &'static str {
        "Get a Linear project by id"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Project id"
                }
            },
            "required": ["projectId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: ProjectIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching project",
            context.backend.get_project(&request.project_id).await,
        )
    }
}

/// Tool for creating a project
pub struct CreateProjectTool;

#[async_trait]
impl McpTool for CreateProjectTool {
    fn name(&self) -> &'static str {
        "createProject"
    }

    fn description(&self) -> &'static str {
        "Create a new Linear project"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Project name"
                },
                "teamIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Teams the project belongs to"
                },
                "description": {
                    "type": "string",
                    "description": "Project description"
                },
                "state": {
                    "type": "string",
                    "description": "Initial state, e.g. planned or started"
                },
                "startDate": {
                    "type": "string",
                    "description": "Start date (YYYY-MM-DD)"
                },
                "targetDate": {
                    "type": "string",
                    "description": "Target date (YYYY-MM-DD)"
                },
                "leadId": {
                    "type": "string",
                    "description": "Project lead"
                }
            },
            "required": ["name", "teamIds"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let params: CreateProjectParams = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error creating project",
            context.backend.create_project(&params).await,
        )
    }
}

/// Tool for listing the issues of a project
pub struct GetProjectIssuesTool;

#[async_trait]
impl McpTool for GetProjectIssuesTool {
    fn name(&self) -> &'static str {
        "getProjectIssues"
    }

    fn description(&self) -> &'static str {
        "Get the issues filed under a Linear project"
    }

    fn schema(&self) -> Value {
        project_page_schema()
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: ProjectPageRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching project issues",
            context
                .backend
                .get_project_issues(&request.project_id, request.limit)
                .await,
        )
    }
}

/// Tool for moving an issue into a project
pub struct AddIssueToProjectTool;

#[async_trait]
impl McpTool for AddIssueToProjectTool {
    fn name(&self) -> &'static str {
        "addIssueToProject"
    }

    fn description(&self) -> &'static str {
        "Add an existing Linear issue to a project"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "issueId": {
                    "type": "string",
                    "description": "Issue id or identifier"
                },
                "projectId": {
                    "type": "string",
                    "description": "Project id"
                }
            },
            "required": ["issueId", "projectId"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: AddIssueToProjectRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error adding issue to project",
            context
                .backend
                .add_issue_to_project(&request.issue_id, &request.project_id)
                .await,
        )
    }
}

/// Tool for listing project status updates
pub struct GetProjectUpdatesTool;

#[async_trait]
impl McpTool for GetProjectUpdatesTool {
    fn name(&self) -> &'static str {
        "getProjectUpdates"
    }

    fn description(&self) -> &'static str {
        "Get the status updates posted on a Linear project"
    }

    fn schema(&self) -> Value {
        project_page_schema()
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: ProjectPageRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching project updates",
            context
                .backend
                .get_project_updates(&request.project_id, request.limit)
                .await,
        )
    }
}

/// Tool for posting a project status update
pub struct CreateProjectUpdateTool;

#[async_trait]
impl McpTool for CreateProjectUpdateTool {
    fn name(&self) -> &'static str {
        "createProjectUpdate"
    }

    fn description(&self) -> &'static str {
        "Post a status update on a Linear project"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Project id"
                },
                "body": {
                    "type": "string",
                    "description": "Update text in markdown"
                },
                "health": {
                    "type": "string",
                    "description": "Project health: onTrack, atRisk or offTrack"
                }
            },
            "required": ["projectId", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        const ACTION: &str = "Error creating project update";
        let params: CreateProjectUpdateParams = BaseToolImpl::parse_arguments(arguments)?;

        if let Some(health) = params.health.as_deref() {
            if !PROJECT_HEALTH.contains(&health) {
                return Ok(BaseToolImpl::create_error_response(
                    ACTION,
                    Some(format!(
                        "health must be one of {}, got '{health}'",
                        PROJECT_HEALTH.join(", ")
                    )),
                ));
            }
        }

        backend_response(ACTION, context.backend.create_project_update(&params).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{response_text, MockLinearBackend};

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_project_tools(&mut registry).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_create_project_requires_team_ids_array() {
        let backend = MockLinearBackend::new();

        let result = registry()
            .dispatch(
                "createProject",
                json!({"name": "Launch", "teamIds": "t1"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(response_text(&result).contains("teamIds: expected array, got string"));
    }

    #[tokio::test]
    async fn test_project_updates_default_limit() {
        let backend = MockLinearBackend::new();
        backend.respond("get_project_updates", json!([]));

        registry()
            .dispatch(
                "getProjectUpdates",
                json!({"projectId": "p1"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(
            backend.calls_to("get_project_updates"),
            vec![json!({"projectId": "p1", "limit": 25})]
        );
    }

    #[tokio::test]
    async fn test_project_update_rejects_unknown_health() {
        let backend = MockLinearBackend::new();

        let result = registry()
            .dispatch(
                "createProjectUpdate",
                json!({"projectId": "p1", "body": "ok", "health": "great"})
                    .as_object()
                    .cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(response_text(&result).starts_with("Error creating project update: health"));
        assert!(backend.calls().is_empty());
    }
}
