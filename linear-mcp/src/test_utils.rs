//! Test utilities for exercising tools without a Linear workspace
//!
//! [`MockLinearBackend`] answers every [`LinearBackend`] operation from
//! scripted JSON and records the arguments each operation received, so tests
//! can assert both what a tool returned and what it asked Linear to do.
//!
//! ```
//! use linear_mcp::test_utils::MockLinearBackend;
//! use serde_json::json;
//!
//! let backend = MockLinearBackend::new();
//! backend.respond("get_teams", json!([{"id": "t1", "name": "Core"}]));
//! assert!(backend.calls().is_empty());
//! ```

use crate::linear::*;
use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// One operation invocation seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Backend method name, e.g. `get_issue`
    pub method: String,
    /// Arguments in camelCase JSON form
    pub arguments: Value,
}

enum Script {
    Always(Result<Value, String>),
    Queue(VecDeque<Result<Value, String>>),
}

/// Scriptable in-memory [`LinearBackend`]
#[derive(Default)]
pub struct MockLinearBackend {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}

impl MockLinearBackend {
    /// Create a mock with nothing scripted; every operation fails until told otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `method` with `response`
    pub fn respond(&self, method: &str, response: Value) {
        lock(&self.scripts).insert(method.to_string(), Script::Always(Ok(response)));
    }

    /// Answer successive calls to `method` from `responses`, in order
    ///
    /// `Err` entries become [`BackendError::Other`]. Once the queue is drained
    /// further calls fail.
    pub fn respond_sequence(&self, method: &str, responses: Vec<Result<Value, String>>) {
        lock(&self.scripts).insert(method.to_string(), Script::Queue(responses.into()));
    }

    /// Fail every call to `method` with `message`
    pub fn fail(&self, method: &str, message: &str) {
        lock(&self.scripts).insert(
            method.to_string(),
            Script::Always(Err(message.to_string())),
        );
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Arguments of every call to `method`, in order
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        lock(&self.calls)
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.arguments.clone())
            .collect()
    }

    fn answer<T: DeserializeOwned>(&self, method: &str, arguments: Value) -> BackendResult<T> {
        lock(&self.calls).push(RecordedCall {
            method: method.to_string(),
            arguments,
        });

        let scripted = match lock(&self.scripts).get_mut(method) {
            Some(Script::Always(response)) => response.clone(),
            Some(Script::Queue(queue)) => queue
                .pop_front()
                .unwrap_or_else(|| Err(format!("no more responses scripted for {method}"))),
            None => Err(format!("no response scripted for {method}")),
        };

        let value = scripted.map_err(BackendError::Other)?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl LinearBackend for MockLinearBackend {
    async fn get_issue(&self, id: &str) -> BackendResult<Issue> {
        self.answer("get_issue", json!({ "id": id }))
    }

    async fn get_issues(&self, limit: u32) -> BackendResult<Vec<Issue>> {
        self.answer("get_issues", json!({ "limit": limit }))
    }

    async fn search_issues(&self, params: &SearchIssuesParams) -> BackendResult<Vec<Issue>> {
        self.answer("search_issues", to_json(params))
    }

    async fn create_issue(&self, params: &CreateIssueParams) -> BackendResult<Issue> {
        self.answer("create_issue", to_json(params))
    }

    async fn update_issue(&self, id: &str, params: &UpdateIssueParams) -> BackendResult<Issue> {
        self.answer(
            "update_issue",
            json!({ "id": id, "changes": to_json(params) }),
        )
    }

    async fn delete_issue(&self, id: &str) -> BackendResult<bool> {
        self.answer("delete_issue", json!({ "id": id }))
    }

    async fn assign_issue(
        &self,
        issue_id: &str,
        assignee_id: Option<&str>,
    ) -> BackendResult<Issue> {
        self.answer(
            "assign_issue",
            json!({ "issueId": issue_id, "assigneeId": assignee_id }),
        )
    }

    async fn get_comments(&self, issue_id: &str, limit: u32) -> BackendResult<Vec<Comment>> {
        self.answer("get_comments", json!({ "issueId": issue_id, "limit": limit }))
    }

    async fn create_comment(&self, issue_id: &str, body: &str) -> BackendResult<Comment> {
        self.answer("create_comment", json!({ "issueId": issue_id, "body": body }))
    }

    async fn get_labels(&self) -> BackendResult<Vec<Label>> {
        self.answer("get_labels", json!({}))
    }

    async fn add_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue> {
        self.answer(
            "add_issue_label",
            json!({ "issueId": issue_id, "labelId": label_id }),
        )
    }

    async fn remove_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue> {
        self.answer(
            "remove_issue_label",
            json!({ "issueId": issue_id, "labelId": label_id }),
        )
    }

    async fn get_users(&self, limit: u32) -> BackendResult<Vec<User>> {
        self.answer("get_users", json!({ "limit": limit }))
    }

    async fn get_user(&self, id: &str) -> BackendResult<User> {
        self.answer("get_user", json!({ "id": id }))
    }

    async fn get_viewer(&self) -> BackendResult<User> {
        self.answer("get_viewer", json!({}))
    }

    async fn get_teams(&self) -> BackendResult<Vec<Team>> {
        self.answer("get_teams", json!({}))
    }

    async fn get_team(&self, id: &str) -> BackendResult<Team> {
        self.answer("get_team", json!({ "id": id }))
    }

    async fn get_team_members(&self, team_id: &str) -> BackendResult<Vec<User>> {
        self.answer("get_team_members", json!({ "teamId": team_id }))
    }

    async fn get_projects(&self, limit: u32) -> BackendResult<Vec<Project>> {
        self.answer("get_projects", json!({ "limit": limit }))
    }

    async fn get_project(&self, id: &str) -> BackendResult<Project> {
        self.answer("get_project", json!({ "id": id }))
    }

    async fn create_project(&self, params: &CreateProjectParams) -> BackendResult<Project> {
        self.answer("create_project", to_json(params))
    }

    async fn get_project_issues(
        &self,
        project_id: &str,
        limit: u32,
    ) -> BackendResult<Vec<Issue>> {
        self.answer(
            "get_project_issues",
            json!({ "projectId": project_id, "limit": limit }),
        )
    }

    async fn add_issue_to_project(
        &self,
        issue_id: &str,
        project_id: &str,
    ) -> BackendResult<Issue> {
        self.answer(
            "add_issue_to_project",
            json!({ "issueId": issue_id, "projectId": project_id }),
        )
    }

    async fn get_project_updates(
        &self,
        project_id: &str,
        limit: u32,
    ) -> BackendResult<Vec<ProjectUpdate>> {
        self.answer(
            "get_project_updates",
            json!({ "projectId": project_id, "limit": limit }),
        )
    }

    async fn create_project_update(
        &self,
        params: &CreateProjectUpdateParams,
    ) -> BackendResult<ProjectUpdate> {
        self.answer("create_project_update", to_json(params))
    }

    async fn get_cycles(&self, team_id: Option<&str>, limit: u32) -> BackendResult<Vec<Cycle>> {
        self.answer("get_cycles", json!({ "teamId": team_id, "limit": limit }))
    }

    async fn get_cycle(&self, id: &str) -> BackendResult<Cycle> {
        self.answer("get_cycle", json!({ "id": id }))
    }

    async fn get_active_cycle(&self, team_id: &str) -> BackendResult<Option<Cycle>> {
        self.answer("get_active_cycle", json!({ "teamId": team_id }))
    }

    async fn create_cycle(&self, params: &CreateCycleParams) -> BackendResult<Cycle> {
        self.answer("create_cycle", to_json(params))
    }

    async fn update_cycle(&self, id: &str, params: &UpdateCycleParams) -> BackendResult<Cycle> {
        self.answer(
            "update_cycle",
            json!({ "id": id, "changes": to_json(params) }),
        )
    }

    async fn get_cycle_issues(&self, cycle_id: &str, limit: u32) -> BackendResult<Vec<Issue>> {
        self.answer(
            "get_cycle_issues",
            json!({ "cycleId": cycle_id, "limit": limit }),
        )
    }

    async fn add_issue_to_cycle(&self, issue_id: &str, cycle_id: &str) -> BackendResult<Issue> {
        self.answer(
            "add_issue_to_cycle",
            json!({ "issueId": issue_id, "cycleId": cycle_id }),
        )
    }

    async fn remove_issue_from_cycle(&self, issue_id: &str) -> BackendResult<Issue> {
        self.answer("remove_issue_from_cycle", json!({ "issueId": issue_id }))
    }

    async fn get_roadmaps(&self, limit: u32) -> BackendResult<Vec<Roadmap>> {
        self.answer("get_roadmaps", json!({ "limit": limit }))
    }

    async fn get_roadmap(&self, id: &str) -> BackendResult<Roadmap> {
        self.answer("get_roadmap", json!({ "id": id }))
    }

    async fn create_roadmap(&self, params: &CreateRoadmapParams) -> BackendResult<Roadmap> {
        self.answer("create_roadmap", to_json(params))
    }

    async fn update_roadmap(
        &self,
        id: &str,
        params: &UpdateRoadmapParams,
    ) -> BackendResult<Roadmap> {
        self.answer(
            "update_roadmap",
            json!({ "id": id, "changes": to_json(params) }),
        )
    }

    async fn get_webhooks(&self, limit: u32) -> BackendResult<Vec<Webhook>> {
        self.answer("get_webhooks", json!({ "limit": limit }))
    }

    async fn create_webhook(&self, params: &CreateWebhookParams) -> BackendResult<Webhook> {
        self.answer("create_webhook", to_json(params))
    }

    async fn delete_webhook(&self, id: &str) -> BackendResult<bool> {
        self.answer("delete_webhook", json!({ "id": id }))
    }
}

/// Concatenated text content of a tool result
pub fn response_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| match &content.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_method_fails() {
        let backend = MockLinearBackend::new();
        let err = backend.get_viewer().await.unwrap_err();
        assert_eq!(err.to_string(), "no response scripted for get_viewer");
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_sequence_drains_in_order() {
        let backend = MockLinearBackend::new();
        backend.respond_sequence(
            "delete_issue",
            vec![Ok(json!(true)), Err("gone".to_string())],
        );

        assert!(backend.delete_issue("1").await.unwrap());
        assert_eq!(backend.delete_issue("1").await.unwrap_err().to_string(), "gone");
        assert!(backend.delete_issue("1").await.is_err());
        assert_eq!(backend.calls_to("delete_issue").len(), 3);
    }

    #[tokio::test]
    async fn test_null_active_cycle_is_none() {
        let backend = MockLinearBackend::new();
        backend.respond("get_active_cycle", Value::Null);
        assert!(backend.get_active_cycle("t1").await.unwrap().is_none());
    }
}
