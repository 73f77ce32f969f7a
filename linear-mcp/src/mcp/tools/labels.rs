//! Label tools

use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all label tools with the registry
pub fn register_label_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetLabelsTool)?;
    registry.register(AddIssueLabelTool)?;
    registry.register(RemoveIssueLabelTool)?;
    Ok(())
}

/// Request pairing an issue with a label
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLabelRequest {
    /// Issue to change
    pub issue_id: String,
    /// Label to attach or detach
    pub label_id: String,
}

fn issue_label_schema(action: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "issueId": {
                "type": "string",
                "description": "Issue id or identifier"
            },
            "labelId": {
                "type": "string",
                "description": format!("Label to {action}")
            }
        },
        "required": ["issueId", "labelId"]
    })
}

/// Tool for listing labels
pub struct GetLabelsTool;

#[async_trait]
impl McpTool for GetLabelsTool {
    fn name(&self) -> &'static str {
        "getLabels"
    }

    fn description(&self) -> &'static str {
        "Get all issue labels in the Linear workspace"
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
        backend_response("Error fetching labels", context.backend.get_labels().await)
    }
}

/// Tool for attaching a label
pub struct AddIssueLabelTool;

#[async_trait]
impl McpTool for AddIssueLabelTool {
    fn name(&self) -> &'static str {
        "addIssueLabel"
    }

    fn description(&self) -> &'static str {
        "Add a label to a Linear issue, keeping its existing labels"
    }

    fn schema(&self) -> Value {
        issue_label_schema("add")
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: IssueLabelRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error adding label to issue",
            context
                .backend
                .add_issue_label(&request.issue_id, &request.label_id)
                .await,
        )
    }
}

/// Tool for detaching a label
pub struct RemoveIssueLabelTool;

#[async_trait]
impl McpTool for RemoveIssueLabelTool {
    fn name(&self) -> &'static str {
        "removeIssueLabel"
    }

    fn description(&self) -> &'static str {
        "Remove a label from a Linear issue"
    }

    fn schema(&self) -> Value {
        issue_label_schema("remove")
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: IssueLabelRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error removing label from issue",
            context
                .backend
                .remove_issue_label(&request.issue_id, &request.label_id)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{response_text, MockLinearBackend};

    #[tokio::test]
    async fn test_remove_label_failure_prefix() {
        let mut registry = ToolRegistry::new();
        register_label_tools(&mut registry).unwrap();
        let backend = MockLinearBackend::new();
        backend.fail("remove_issue_label", "Linear GraphQL error: Entity not found");

        let result = registry
            .dispatch(
                "removeIssueLabel",
                json!({"issueId": "1", "labelId": "l1"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(
            response_text(&result),
            "Error removing label from issue: Linear GraphQL error: Entity not found"
        );
        assert_eq!(
            backend.calls_to("remove_issue_label"),
            vec![json!({"issueId": "1", "labelId": "l1"})]
        );
    }
}
