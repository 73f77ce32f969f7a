//! Webhook tools

use crate::linear::CreateWebhookParams;
use crate::mcp::responses::{backend_response, create_backend_error_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::issues::LimitRequest;
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all webhook tools with the registry
pub fn register_webhook_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetWebhooksTool)?;
    registry.register(CreateWebhookTool)?;
    registry.register(DeleteWebhookTool)?;
    Ok(())
}

/// Request naming a webhook
#[derive(Debug, Deserialize)]
pub struct WebhookIdRequest {
    /// Webhook id
    pub id: String,
}

/// Tool for listing webhooks
pub struct GetWebhooksTool;

#[async_trait]
impl McpTool for GetWebhooksTool {
    fn name(&self) -> &'static str {
        "getWebhooks"
    }

    fn description(&self) -> &'static str {
        "Get the webhooks configured in the Linear workspace"
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
            "Error fetching webhooks",
            context.backend.get_webhooks(request.limit).await,
        )
    }
}

/// Tool for creating a webhook
pub struct CreateWebhookTool;

#[async_trait]
impl McpTool for CreateWebhookTool {
    fn name(&self) -> &'static str {
        "createWebhook"
    }

    fn description(&self) -> &'static str {
        "Create a Linear webhook delivering events for the given resource types"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL receiving webhook payloads"
                },
                "resourceTypes": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Resource types to subscribe to, e.g. Issue, Comment"
                },
                "label": {
                    "type": "string",
                    "description": "Webhook label"
                },
                "teamId": {
                    "type": "string",
                    "description": "Only events of this team"
                },
                "enabled": {
                    "type": "boolean",
                    "description": "Whether deliveries start enabled",
                    "default": true
                }
            },
            "required": ["url", "resourceTypes"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let params: CreateWebhookParams = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error creating webhook",
            context.backend.create_webhook(&params).await,
        )
    }
}

/// Tool for deleting a webhook
pub struct DeleteWebhookTool;

#[async_trait]
impl McpTool for DeleteWebhookTool {
    fn name(&self) -> &'static str {
        "deleteWebhook"
    }

    fn description(&self) -> &'static str {
        "Delete a Linear webhook"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Webhook id"
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
        let request: WebhookIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        match context.backend.delete_webhook(&request.id).await {
            Ok(true) => Ok(BaseToolImpl::create_success_response(format!(
                "Webhook {} deleted successfully",
                request.id
            ))),
            Ok(false) => Ok(BaseToolImpl::create_error_response(
                format!("Failed to delete webhook {}", request.id),
                None,
            )),
            Err(e) => Ok(create_backend_error_response("Error deleting webhook", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{response_text, MockLinearBackend};

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        register_webhook_tools(&mut registry).unwrap();
        registry
    }

    #[tokio::test]
    async fn test_delete_webhook_messages() {
        let backend = MockLinearBackend::new();
        backend.respond_sequence("delete_webhook", vec![Ok(json!(true)), Ok(json!(false))]);
        let registry = registry();
        let args = json!({"id": "w1"}).as_object().cloned();

        let result = registry.dispatch("deleteWebhook", args.clone(), &backend).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(response_text(&result), "Webhook w1 deleted successfully");

        let result = registry.dispatch("deleteWebhook", args, &backend).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(response_text(&result), "Failed to delete webhook w1");
    }

    #[tokio::test]
    async fn test_create_webhook_defaults_enabled() {
        let backend = MockLinearBackend::new();
        backend.respond(
            "create_webhook",
            json!({"id": "w1", "enabled": true, "resourceTypes": ["Issue"]}),
        );

        registry()
            .dispatch(
                "createWebhook",
                json!({"url": "https://example.com/hook", "resourceTypes": ["Issue"]})
                    .as_object()
                    .cloned(),
                &backend,
            )
            .await;

        assert_eq!(
            backend.calls_to("create_webhook"),
            vec![json!({
                "url": "https://example.com/hook",
                "resourceTypes": ["Issue"],
                "enabled": true
            })]
        );
    }
}
