//! Registry introspection tools
//!
//! `listTools` and `enableTool` let a client discover the full catalog,
//! including disabled tools, and switch tools on at runtime. They reach the
//! registry through the [`ToolContext`] built for each call.

use crate::mcp::responses::create_json_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Name of the catalog listing tool
pub const LIST_TOOLS: &str = "listTools";
/// Name of the tool enabling tool
pub const ENABLE_TOOL: &str = "enableTool";

/// Register the meta tools with the registry
pub fn register_meta_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(ListToolsTool)?;
    registry.register(EnableToolTool)?;
    Ok(())
}

/// Request for `enableTool`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableToolRequest {
    /// Tool to enable
    pub tool_name: String,
}

/// Result of a successful `enableTool` call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableToolResponse {
    /// Always true
    pub success: bool,
    /// Tool that was enabled
    pub tool_name: String,
    /// New flag value
    pub enabled: bool,
}

/// Tool listing every registered tool
pub struct ListToolsTool;

#[async_trait]
impl McpTool for ListToolsTool {
    fn name(&self) -> &'static str {
        LIST_TOOLS
    }

    fn description(&self) -> &'static str {
        "List every available tool with its description, including disabled tools"
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
        create_json_response(&context.registry.list())
    }
}

/// Tool switching a disabled tool on
pub struct EnableToolTool;

#[async_trait]
impl McpTool for EnableToolTool {
    fn name(&self) -> &'static str {
        ENABLE_TOOL
    }

    fn description(&self) -> &'static str {
        "Enable a tool by name so it can be called"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "toolName": {
                    "type": "string",
                    "description": "Name of the tool to enable"
                }
            },
            "required": ["toolName"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let request: EnableToolRequest = BaseToolImpl::parse_arguments(arguments)?;

        match context.registry.set_enabled(&request.tool_name, true) {
            Ok(()) => create_json_response(&EnableToolResponse {
                success: true,
                tool_name: request.tool_name,
                enabled: true,
            }),
            Err(e) => Ok(BaseToolImpl::create_error_response(
                "Error enabling tool",
                Some(e.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::issues::register_issue_tools;
    use crate::test_utils::{response_text, MockLinearBackend};

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_meta_tools(&mut registry).unwrap();
        register_issue_tools(&mut registry).unwrap();
        registry.set_enabled("deleteIssue", false).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_list_tools_includes_disabled_without_schemas() {
        let registry = registry();
        let backend = MockLinearBackend::new();

        let result = registry.dispatch(LIST_TOOLS, None, &backend).await;
        assert_eq!(result.is_error, Some(false));

        let listed: Value = serde_json::from_str(&response_text(&result)).unwrap();
        let entries = listed.as_array().unwrap();
        assert_eq!(entries.len(), registry.len());
        assert!(entries.iter().any(|e| e["name"] == "deleteIssue"));
        for entry in entries {
            let mut keys: Vec<_> = entry.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            assert_eq!(keys, vec!["description".to_string(), "name".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_enable_tool() {
        let registry = registry();
        let backend = MockLinearBackend::new();

        let result = registry
            .dispatch(
                ENABLE_TOOL,
                json!({"toolName": "deleteIssue"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            serde_json::from_str::<Value>(&response_text(&result)).unwrap(),
            json!({"success": true, "toolName": "deleteIssue", "enabled": true})
        );
        assert_eq!(registry.is_enabled("deleteIssue"), Some(true));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_enable_unknown_tool() {
        let registry = registry();
        let backend = MockLinearBackend::new();

        let result = registry
            .dispatch(
                ENABLE_TOOL,
                json!({"toolName": "frobnicate"}).as_object().cloned(),
                &backend,
            )
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            response_text(&result),
            "Error enabling tool: Tool 'frobnicate' not found"
        );
    }
}
