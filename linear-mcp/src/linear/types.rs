//! Linear domain models and operation parameters
//!
//! Models mirror the fields requested by the GraphQL documents in
//! [`super::queries`]. Optional fields are omitted when serialized so a tool
//! result only shows what Linear actually returned.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Default page size for list operations
pub const DEFAULT_LIMIT: u32 = 25;

/// Serde default for `limit` fields
pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// A GraphQL connection page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    /// Items on this page
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Minimal user reference embedded in other entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Minimal team reference embedded in other entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    /// Team id
    pub id: String,
    /// Team name
    pub name: String,
    /// Short team key used in issue identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Workflow state of an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// State id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// State name
    pub name: String,
    /// State color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Loose reference to a project, cycle or issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    /// Entity id
    pub id: String,
    /// Name, for projects and cycles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human readable identifier, for issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Title, for issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Cycle number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
}

/// A Linear issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Issue id
    pub id: String,
    /// Identifier such as `ENG-123`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Issue title
    pub title: String,
    /// Markdown description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority, 0 (none) to 4 (low)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Number>,
    /// Estimate points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Number>,
    /// Workflow state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WorkflowState>,
    /// Assigned user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    /// Attached labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Connection<Label>>,
    /// Owning team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
    /// Project the issue belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityRef>,
    /// Cycle the issue belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<EntityRef>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id
    pub id: String,
    /// Markdown body
    pub body: String,
    /// Author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    /// Issue commented on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<EntityRef>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An issue label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label id
    pub id: String,
    /// Label name
    pub name: String,
    /// Hex color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A workspace user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: String,
    /// Full name
    pub name: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the account is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Whether the user is an admin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

/// A team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team id
    pub id: String,
    /// Team name
    pub name: String,
    /// Short key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Team members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Connection<UserRef>>,
}

/// A project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    pub id: String,
    /// Project name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Completion progress between 0 and 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Planned start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    /// Project lead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<UserRef>,
    /// Teams the project belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Connection<TeamRef>>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A status update posted on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    /// Update id
    pub id: String,
    /// Markdown body
    pub body: String,
    /// Health: onTrack, atRisk or offTrack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    /// Author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    /// Project updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityRef>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A team cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    /// Cycle id
    pub id: String,
    /// Optional name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sequential cycle number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    /// Start timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    /// End timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    /// Completion progress between 0 and 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Whether this is the team's current cycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Owning team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
}

/// A roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    /// Roadmap id
    pub id: String,
    /// Roadmap name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A webhook subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook id
    pub id: String,
    /// Target URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether deliveries are enabled
    pub enabled: bool,
    /// Subscribed resource types
    #[serde(default)]
    pub resource_types: Vec<String>,
    /// Team scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Filters for `searchIssues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIssuesParams {
    /// Text matched against title and description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Restrict to a team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Restrict to a workflow state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    /// Restrict to an assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Restrict to issues carrying any of these labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Input for `createIssue`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueParams {
    /// Issue title
    pub title: String,
    /// Markdown description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning team; the first team is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Workflow state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    /// Priority, 0 (none) to 4 (low)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Estimate points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Number>,
    /// Labels to attach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    /// Project to file the issue under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Cycle to schedule the issue in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<String>,
}

/// Input for `updateIssue`; only the supplied fields change
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueParams {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New workflow state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    /// New assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// New estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Number>,
    /// Replacement label set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
    /// Move to another team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Move to a project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Move to a cycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<String>,
}

/// Input for `createProject`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectParams {
    /// Project name
    pub name: String,
    /// Teams the project belongs to
    pub team_ids: Vec<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Planned start date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Target date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    /// Project lead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
}

/// Input for `createProjectUpdate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectUpdateParams {
    /// Project receiving the update
    pub project_id: String,
    /// Markdown body
    pub body: String,
    /// Health: onTrack, atRisk or offTrack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

/// Input for `createCycle`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCycleParams {
    /// Owning team
    pub team_id: String,
    /// Start timestamp (ISO 8601)
    pub starts_at: String,
    /// End timestamp (ISO 8601)
    pub ends_at: String,
    /// Optional name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input for `updateCycle`; only the supplied fields change
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCycleParams {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New start timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    /// New end timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
}

/// Input for `createRoadmap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoadmapParams {
    /// Roadmap name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Input for `updateRoadmap`; only the supplied fields change
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoadmapParams {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Input for `createWebhook`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookParams {
    /// URL receiving payloads
    pub url: String,
    /// Resource types to subscribe to, e.g. `Issue`, `Comment`
    pub resource_types: Vec<String>,
    /// Label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Team scope; all public teams when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Whether deliveries start enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_serialization_skips_absent_fields() {
        let issue: Issue = serde_json::from_value(json!({"id": "1", "title": "Test"})).unwrap();
        assert_eq!(
            serde_json::to_string(&issue).unwrap(),
            r#"{"id":"1","title":"Test"}"#
        );
    }

    #[test]
    fn test_issue_deserializes_nested_graphql_shape() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "abc",
            "identifier": "ENG-1",
            "title": "Broken build",
            "state": {"id": "s1", "name": "Todo"},
            "labels": {"nodes": [{"id": "l1", "name": "bug"}]},
            "team": {"id": "t1", "name": "Engineering"},
            "createdAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(issue.identifier.as_deref(), Some("ENG-1"));
        assert_eq!(issue.state.unwrap().name, "Todo");
        assert_eq!(issue.labels.unwrap().nodes[0].name, "bug");
        assert_eq!(issue.created_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_search_params_default_limit() {
        let params: SearchIssuesParams = serde_json::from_value(json!({"query": "crash"})).unwrap();
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_webhook_params_default_enabled() {
        let params: CreateWebhookParams = serde_json::from_value(json!({
            "url": "https://example.com/hook",
            "resourceTypes": ["Issue"]
        }))
        .unwrap();
        assert!(params.enabled);
    }
}
