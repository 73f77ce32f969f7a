//! GraphQL client for the Linear API

use super::queries;
use super::types::*;
use super::{BackendResult, LinearBackend};
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("linear-mcp/", env!("CARGO_PKG_VERSION"));

/// Errors returned by Linear API calls
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Linear answered with a non-success status
    #[error("Linear API error: {status} {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body as returned by Linear
        body: String,
    },

    /// The response carried a GraphQL `errors` array
    #[error("Linear GraphQL error: {0}")]
    GraphQl(String),

    /// The expected field was absent from `data`
    #[error("Linear response is missing '{0}'")]
    MissingData(String),

    /// The response did not match the expected shape
    #[error("Failed to decode Linear response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

/// Connection settings for [`LinearClient`]
#[derive(Clone)]
pub struct LinearClientConfig {
    /// Personal API key, sent verbatim in the `Authorization` header
    pub api_key: String,
    /// GraphQL endpoint
    pub base_url: url::Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl LinearClientConfig {
    /// Settings with the default request timeout
    pub fn new(api_key: impl Into<String>, base_url: url::Url) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for LinearClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// [`LinearBackend`] implementation over HTTP
#[derive(Debug, Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    config: LinearClientConfig,
}

impl LinearClient {
    /// Build a client; the configuration is fixed for its lifetime
    pub fn new(config: LinearClientConfig) -> BackendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &LinearClientConfig {
        &self.config
    }

    /// Send a GraphQL document and return the `data` object
    async fn request(&self, query: &str, variables: Value) -> BackendResult<Value> {
        let operation = query.split(['(', '{']).next().unwrap_or(query).trim();
        tracing::debug!("Linear request: {}", operation);

        let response = self
            .http
            .post(self.config.base_url.clone())
            .header(AUTHORIZATION, &self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut envelope: Value = serde_json::from_str(&body)?;
        if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return Err(BackendError::GraphQl(join_error_messages(errors)));
            }
        }

        match envelope.get_mut("data").map(Value::take) {
            Some(Value::Null) | None => Err(BackendError::MissingData("data".to_string())),
            Some(data) => Ok(data),
        }
    }

    /// Send a document and decode the value found at `path` inside `data`
    async fn request_at<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        path: &[&str],
    ) -> BackendResult<T> {
        match self.request_optional_at(query, variables, path).await? {
            Some(value) => Ok(value),
            None => Err(BackendError::MissingData(path.join("."))),
        }
    }

    /// Like [`Self::request_at`], but a `null` leaf decodes to `None`
    async fn request_optional_at<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        path: &[&str],
    ) -> BackendResult<Option<T>> {
        let data = self.request(query, variables).await?;
        let value = extract_path(data, path)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn update_issue_input(&self, id: &str, input: Value) -> BackendResult<Issue> {
        self.request_at(
            queries::UPDATE_ISSUE,
            json!({ "id": id, "input": input }),
            &["issueUpdate", "issue"],
        )
        .await
    }
}

/// Walk `path` inside `data`; intermediate `null`s count as missing
fn extract_path(mut data: Value, path: &[&str]) -> BackendResult<Value> {
    for (depth, key) in path.iter().enumerate() {
        let is_leaf = depth + 1 == path.len();
        data = match data {
            Value::Object(mut map) => match map.remove(*key) {
                Some(Value::Null) if !is_leaf => None,
                other => other,
            },
            _ => None,
        }
        .ok_or_else(|| BackendError::MissingData(path[..=depth].join(".")))?;
    }
    Ok(data)
}

fn join_error_messages(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| match e.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => e.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build the `IssueFilter` for an issue search
///
/// Structured filters are combined with AND; the free text query matches
/// either the title or the description, ignoring case.
pub fn build_issue_filter(params: &SearchIssuesParams) -> Value {
    let mut filter = serde_json::Map::new();

    if let Some(team_id) = &params.team_id {
        filter.insert("team".into(), json!({ "id": { "eq": team_id } }));
    }
    if let Some(state_id) = &params.state_id {
        filter.insert("state".into(), json!({ "id": { "eq": state_id } }));
    }
    if let Some(assignee_id) = &params.assignee_id {
        filter.insert("assignee".into(), json!({ "id": { "eq": assignee_id } }));
    }
    if let Some(label_ids) = params.label_ids.as_ref().filter(|ids| !ids.is_empty()) {
        filter.insert(
            "labels".into(),
            json!({ "some": { "id": { "in": label_ids } } }),
        );
    }
    if let Some(query) = params.query.as_deref().filter(|q| !q.trim().is_empty()) {
        filter.insert(
            "or".into(),
            json!([
                { "title": { "containsIgnoreCase": query } },
                { "description": { "containsIgnoreCase": query } }
            ]),
        );
    }

    Value::Object(filter)
}

/// Build the `CycleFilter` restricting cycles to a team
pub fn build_cycle_filter(team_id: Option<&str>) -> Value {
    match team_id {
        Some(team_id) => json!({ "team": { "id": { "eq": team_id } } }),
        None => Value::Null,
    }
}

fn to_input<T: serde::Serialize>(params: &T) -> BackendResult<Value> {
    Ok(serde_json::to_value(params)?)
}

#[async_trait]
impl LinearBackend for LinearClient {
    async fn get_issue(&self, id: &str) -> BackendResult<Issue> {
        self.request_at(queries::ISSUE, json!({ "id": id }), &["issue"])
            .await
    }

    async fn get_issues(&self, limit: u32) -> BackendResult<Vec<Issue>> {
        self.request_at(
            queries::ISSUES,
            json!({ "first": limit }),
            &["issues", "nodes"],
        )
        .await
    }

    async fn search_issues(&self, params: &SearchIssuesParams) -> BackendResult<Vec<Issue>> {
        let variables = json!({ "filter": build_issue_filter(params), "first": params.limit });
        self.request_at(queries::SEARCH_ISSUES, variables, &["issues", "nodes"])
            .await
    }

    async fn create_issue(&self, params: &CreateIssueParams) -> BackendResult<Issue> {
        self.request_at(
            queries::CREATE_ISSUE,
            json!({ "input": to_input(params)? }),
            &["issueCreate", "issue"],
        )
        .await
    }

    async fn update_issue(&self, id: &str, params: &UpdateIssueParams) -> BackendResult<Issue> {
        self.update_issue_input(id, to_input(params)?).await
    }

    async fn delete_issue(&self, id: &str) -> BackendResult<bool> {
        self.request_at(
            queries::DELETE_ISSUE,
            json!({ "id": id }),
            &["issueDelete", "success"],
        )
        .await
    }

    async fn assign_issue(
        &self,
        issue_id: &str,
        assignee_id: Option<&str>,
    ) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "assigneeId": assignee_id }))
            .await
    }

    async fn get_comments(&self, issue_id: &str, limit: u32) -> BackendResult<Vec<Comment>> {
        self.request_at(
            queries::COMMENTS,
            json!({ "issueId": issue_id, "first": limit }),
            &["issue", "comments", "nodes"],
        )
        .await
    }

    async fn create_comment(&self, issue_id: &str, body: &str) -> BackendResult<Comment> {
        self.request_at(
            queries::CREATE_COMMENT,
            json!({ "input": { "issueId": issue_id, "body": body } }),
            &["commentCreate", "comment"],
        )
        .await
    }

    async fn get_labels(&self) -> BackendResult<Vec<Label>> {
        self.request_at(queries::LABELS, json!({}), &["issueLabels", "nodes"])
            .await
    }

    async fn add_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "addedLabelIds": [label_id] }))
            .await
    }

    async fn remove_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "removedLabelIds": [label_id] }))
            .await
    }

    async fn get_users(&self, limit: u32) -> BackendResult<Vec<User>> {
        self.request_at(queries::USERS, json!({ "first": limit }), &["users", "nodes"])
            .await
    }

    async fn get_user(&self, id: &str) -> BackendResult<User> {
        self.request_at(queries::USER, json!({ "id": id }), &["user"])
            .await
    }

    async fn get_viewer(&self) -> BackendResult<User> {
        self.request_at(queries::VIEWER, json!({}), &["viewer"]).await
    }

    async fn get_teams(&self) -> BackendResult<Vec<Team>> {
        self.request_at(queries::TEAMS, json!({}), &["teams", "nodes"])
            .await
    }

    async fn get_team(&self, id: &str) -> BackendResult<Team> {
        self.request_at(queries::TEAM, json!({ "id": id }), &["team"])
            .await
    }

    async fn get_team_members(&self, team_id: &str) -> BackendResult<Vec<User>> {
        self.request_at(
            queries::TEAM_MEMBERS,
            json!({ "teamId": team_id }),
            &["team", "members", "nodes"],
        )
        .await
    }

    async fn get_projects(&self, limit: u32) -> BackendResult<Vec<Project>> {
        self.request_at(
            queries::PROJECTS,
            json!({ "first": limit }),
            &["projects", "nodes"],
        )
        .await
    }

    async fn get_project(&self, id: &str) -> BackendResult<Project> {
        self.request_at(queries::PROJECT, json!({ "id": id }), &["project"])
            .await
    }

    async fn create_project(&self, params: &CreateProjectParams) -> BackendResult<Project> {
        self.request_at(
            queries::CREATE_PROJECT,
            json!({ "input": to_input(params)? }),
            &["projectCreate", "project"],
        )
        .await
    }

    async fn get_project_issues(
        &self,
        project_id: &str,
        limit: u32,
    ) -> BackendResult<Vec<Issue>> {
        self.request_at(
            queries::PROJECT_ISSUES,
            json!({ "projectId": project_id, "first": limit }),
            &["project", "issues", "nodes"],
        )
        .await
    }

    async fn add_issue_to_project(
        &self,
        issue_id: &str,
        project_id: &str,
    ) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "projectId": project_id }))
            .await
    }

    async fn get_project_updates(
        &self,
        project_id: &str,
        limit: u32,
    ) -> BackendResult<Vec<ProjectUpdate>> {
        self.request_at(
            queries::PROJECT_UPDATES,
            json!({ "projectId": project_id, "first": limit }),
            &["project", "projectUpdates", "nodes"],
        )
        .await
    }

    async fn create_project_update(
        &self,
        params: &CreateProjectUpdateParams,
    ) -> BackendResult<ProjectUpdate> {
        self.request_at(
            queries::CREATE_PROJECT_UPDATE,
            json!({ "input": to_input(params)? }),
            &["projectUpdateCreate", "projectUpdate"],
        )
        .await
    }

    async fn get_cycles(&self, team_id: Option<&str>, limit: u32) -> BackendResult<Vec<Cycle>> {
        self.request_at(
            queries::CYCLES,
            json!({ "filter": build_cycle_filter(team_id), "first": limit }),
            &["cycles", "nodes"],
        )
        .await
    }

    async fn get_cycle(&self, id: &str) -> BackendResult<Cycle> {
        self.request_at(queries::CYCLE, json!({ "id": id }), &["cycle"])
            .await
    }

    async fn get_active_cycle(&self, team_id: &str) -> BackendResult<Option<Cycle>> {
        self.request_optional_at(
            queries::ACTIVE_CYCLE,
            json!({ "teamId": team_id }),
            &["team", "activeCycle"],
        )
        .await
    }

    async fn create_cycle(&self, params: &CreateCycleParams) -> BackendResult<Cycle> {
        self.request_at(
            queries::CREATE_CYCLE,
            json!({ "input": to_input(params)? }),
            &["cycleCreate", "cycle"],
        )
        .await
    }

    async fn update_cycle(&self, id: &str, params: &UpdateCycleParams) -> BackendResult<Cycle> {
        self.request_at(
            queries::UPDATE_CYCLE,
            json!({ "id": id, "input": to_input(params)? }),
            &["cycleUpdate", "cycle"],
        )
        .await
    }

    async fn get_cycle_issues(&self, cycle_id: &str, limit: u32) -> BackendResult<Vec<Issue>> {
        self.request_at(
            queries::CYCLE_ISSUES,
            json!({ "cycleId": cycle_id, "first": limit }),
            &["cycle", "issues", "nodes"],
        )
        .await
    }

    async fn add_issue_to_cycle(&self, issue_id: &str, cycle_id: &str) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "cycleId": cycle_id }))
            .await
    }

    async fn remove_issue_from_cycle(&self, issue_id: &str) -> BackendResult<Issue> {
        self.update_issue_input(issue_id, json!({ "cycleId": null }))
            .await
    }

    async fn get_roadmaps(&self, limit: u32) -> BackendResult<Vec<Roadmap>> {
        self.request_at(
            queries::ROADMAPS,
            json!({ "first": limit }),
            &["roadmaps", "nodes"],
        )
        .await
    }

    async fn get_roadmap(&self, id: &str) -> BackendResult<Roadmap> {
        self.request_at(queries::ROADMAP, json!({ "id": id }), &["roadmap"])
            .await
    }

    async fn create_roadmap(&self, params: &CreateRoadmapParams) -> BackendResult<Roadmap> {
        self.request_at(
            queries::CREATE_ROADMAP,
            json!({ "input": to_input(params)? }),
            &["roadmapCreate", "roadmap"],
        )
        .await
    }

    async fn update_roadmap(
        &self,
        id: &str,
        params: &UpdateRoadmapParams,
    ) -> BackendResult<Roadmap> {
        self.request_at(
            queries::UPDATE_ROADMAP,
            json!({ "id": id, "input": to_input(params)? }),
            &["roadmapUpdate", "roadmap"],
        )
        .await
    }

    async fn get_webhooks(&self, limit: u32) -> BackendResult<Vec<Webhook>> {
        self.request_at(
            queries::WEBHOOKS,
            json!({ "first": limit }),
            &["webhooks", "nodes"],
        )
        .await
    }

    async fn create_webhook(&self, params: &CreateWebhookParams) -> BackendResult<Webhook> {
        self.request_at(
            queries::CREATE_WEBHOOK,
            json!({ "input": to_input(params)? }),
            &["webhookCreate", "webhook"],
        )
        .await
    }

    async fn delete_webhook(&self, id: &str) -> BackendResult<bool> {
        self.request_at(
            queries::DELETE_WEBHOOK,
            json!({ "id": id }),
            &["webhookDelete", "success"],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_filter_combines_structured_fields() {
        let params = SearchIssuesParams {
            query: None,
            team_id: Some("team-1".to_string()),
            state_id: Some("state-1".to_string()),
            assignee_id: None,
            label_ids: Some(vec!["bug".to_string(), "ui".to_string()]),
            limit: DEFAULT_LIMIT,
        };

        assert_eq!(
            build_issue_filter(&params),
            json!({
                "team": { "id": { "eq": "team-1" } },
                "state": { "id": { "eq": "state-1" } },
                "labels": { "some": { "id": { "in": ["bug", "ui"] } } }
            })
        );
    }

    #[test]
    fn test_issue_filter_text_query_matches_title_or_description() {
        let params = SearchIssuesParams {
            query: Some("crash".to_string()),
            team_id: None,
            state_id: None,
            assignee_id: None,
            label_ids: Some(vec![]),
            limit: 10,
        };

        let filter = build_issue_filter(&params);
        assert_eq!(
            filter["or"],
            json!([
                { "title": { "containsIgnoreCase": "crash" } },
                { "description": { "containsIgnoreCase": "crash" } }
            ])
        );
        assert!(filter.get("labels").is_none());
    }

    #[test]
    fn test_cycle_filter() {
        assert_eq!(build_cycle_filter(None), Value::Null);
        assert_eq!(
            build_cycle_filter(Some("t1")),
            json!({ "team": { "id": { "eq": "t1" } } })
        );
    }

    #[test]
    fn test_extract_path() {
        let data = json!({ "issue": { "comments": { "nodes": [] } }, "team": null });
        assert_eq!(
            extract_path(data.clone(), &["issue", "comments", "nodes"]).unwrap(),
            json!([])
        );
        assert_eq!(extract_path(data.clone(), &["team"]).unwrap(), Value::Null);

        let err = extract_path(data, &["team", "activeCycle"]).unwrap_err();
        assert_eq!(err.to_string(), "Linear response is missing 'team'");
    }

    #[test]
    fn test_join_error_messages() {
        let errors = vec![
            json!({ "message": "Entity not found" }),
            json!({ "message": "Argument Validation Error" }),
        ];
        assert_eq!(
            join_error_messages(&errors),
            "Entity not found; Argument Validation Error"
        );
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = LinearClientConfig::new(
            "lin_api_secret",
            url::Url::parse(crate::config::DEFAULT_API_URL).unwrap(),
        );
        let debug = format!("{config:?}");
        assert!(!debug.contains("lin_api_secret"));
        assert!(debug.contains("api.linear.app"));
    }

    #[test]
    fn test_status_error_display() {
        let err = BackendError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Linear API error: 401 Unauthorized");
    }
}
