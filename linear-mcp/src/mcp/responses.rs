//! Response creation utilities for MCP tool calls
//!
//! Successful tool results carry the pretty-printed JSON of whatever the
//! backend returned. Backend failures become error results prefixed with the
//! action that failed, e.g. `Error fetching issue: Linear API error: 404 ...`.

use super::tool_registry::BaseToolImpl;
use crate::linear::BackendError;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Serialize;

/// Create a success response holding `value` as pretty JSON
pub fn create_json_response<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize response: {e}"), None)
    })?;
    Ok(BaseToolImpl::create_success_response(text))
}

/// Create an error response for a failed backend call
pub fn create_backend_error_response(action: &str, error: &BackendError) -> CallToolResult {
    tracing::error!("{}: {}", action, error);
    BaseToolImpl::create_error_response(action, Some(error.to_string()))
}

/// Turn a backend result into a tool result
///
/// `action` names the failed operation, e.g. `Error fetching issue`.
pub fn backend_response<T: Serialize>(
    action: &str,
    result: Result<T, BackendError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => create_json_response(&value),
        Err(e) => Ok(create_backend_error_response(action, &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::response_text;
    use serde_json::json;

    #[test]
    fn test_json_response_is_pretty_printed() {
        let result = create_json_response(&json!({"id": "1", "title": "Test"})).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(response_text(&result), "{\n  \"id\": \"1\",\n  \"title\": \"Test\"\n}");
    }

    #[test]
    fn test_backend_error_response() {
        let result = backend_response::<()>(
            "Error fetching issue",
            Err(BackendError::Status {
                status: 401,
                body: "Unauthorized".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            response_text(&result),
            "Error fetching issue: Linear API error: 401 Unauthorized"
        );
    }
}
