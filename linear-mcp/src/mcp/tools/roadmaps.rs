//! Roadmap tools

use crate::linear::{CreateRoadmapParams, UpdateRoadmapParams};
use crate::mcp::responses::backend_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, RegistryError, ToolContext, ToolRegistry};
use crate::mcp::tools::issues::LimitRequest;
use crate::mcp::tools::limit_property;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Register all roadmap tools with the registry
pub fn register_roadmap_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(GetRoadmapsTool)?;
    registry.register(GetRoadmapByIdTool)?;
    registry.register(CreateRoadmapTool)?;
    registry.register(UpdateRoadmapTool)?;
    Ok(())
}

/// Request naming a roadmap
#[derive(Debug, Deserialize)]
pub struct RoadmapIdRequest {
    /// Roadmap id
    pub id: String,
}

/// Request for `updateRoadmap`
#[derive(Debug, Deserialize)]
pub struct UpdateRoadmapRequest {
    /// Roadmap to update
    pub id: String,
    /// Fields to change
    #[serde(flatten)]
    pub changes: UpdateRoadmapParams,
}

fn roadmap_properties() -> Map<String, Value> {
    let properties = json!({
        "name": {
            "type": "string",
            "description": "Roadmap name"
        },
        "description": {
            "type": "string",
            "description": "Roadmap description"
        },
        "color": {
            "type": "string",
            "description": "Roadmap color, e.g. #5e6ad2"
        },
        "ownerId": {
            "type": "string",
            "description": "User owning the roadmap"
        }
    });
    match properties {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Tool for listing roadmaps
pub struct GetRoadmapsTool;

#[async_trait]
impl McpTool for GetRoadmapsTool {
    fn name(&self) -> &'static str {
        "getRoadmaps"
    }

    fn description(&self) -> &'static str {
        "Get Linear roadmaps"
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
            "Error fetching roadmaps",
            context.backend.get_roadmaps(request.limit).await,
        )
    }
}

/// Tool for fetching one roadmap
pub struct GetRoadmapByIdTool;

#[async_trait]
impl McpTool for GetRoadmapByIdTool {
    fn name(&self) -> &'static str {
        "getRoadmapById"
    }

    fn description(&self) -> &'static str {
        "Get a Linear roadmap by id"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Roadmap id"
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
        let request: RoadmapIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error fetching roadmap",
            context.backend.get_roadmap(&request.id).await,
        )
    }
}

/// Tool for creating a roadmap
pub struct CreateRoadmapTool;

#[async_trait]
impl McpTool for CreateRoadmapTool {
    fn name(&self) -> &'static str {
        "createRoadmap"
    }

    fn description(&self) -> &'static str {
        "Create a new Linear roadmap"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": roadmap_properties(),
            "required": ["name"]
        })
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let params: CreateRoadmapParams = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error creating roadmap",
            context.backend.create_roadmap(&params).await,
        )
    }
}

/// Tool for updating a roadmap
pub struct UpdateRoadmapTool;

#[async_trait]
impl McpTool for UpdateRoadmapTool {
    fn name(&self) -> &'static str {
        "updateRoadmap"
    }

    fn description(&self) -> &'static str {
        "Update an existing Linear roadmap; only the supplied fields change"
    }

    fn schema(&self) -> Value {
        let mut properties = roadmap_properties();
        properties.insert(
            "id".to_string(),
            json!({ "type": "string", "description": "Roadmap id" }),
        );
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
        let request: UpdateRoadmapRequest = BaseToolImpl::parse_arguments(arguments)?;
        backend_response(
            "Error updating roadmap",
            context
                .backend
                .update_roadmap(&request.id, &request.changes)
                .await,
        )
    }
}
