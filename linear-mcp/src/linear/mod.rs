//! Linear API access
//!
//! [`LinearBackend`] is the capability surface the MCP tools are written
//! against: one async operation per domain action. [`LinearClient`] is the
//! production implementation speaking GraphQL over HTTPS; tests substitute
//! [`crate::test_utils::MockLinearBackend`].

mod client;
mod queries;
pub mod types;

pub use client::{
    build_cycle_filter, build_issue_filter, BackendError, LinearClient, LinearClientConfig,
};
pub use types::*;

use async_trait::async_trait;

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Operations the tools need from Linear
///
/// Implementations must be cheap to share across concurrent tool calls.
#[async_trait]
pub trait LinearBackend: Send + Sync {
    /// Fetch a single issue by id or identifier
    async fn get_issue(&self, id: &str) -> BackendResult<Issue>;

    /// Fetch the most recent issues
    async fn get_issues(&self, limit: u32) -> BackendResult<Vec<Issue>>;

    /// Search issues by text and filters
    async fn search_issues(&self, params: &SearchIssuesParams) -> BackendResult<Vec<Issue>>;

    /// Create an issue; `team_id` must be resolved by the caller
    async fn create_issue(&self, params: &CreateIssueParams) -> BackendResult<Issue>;

    /// Update the supplied fields of an issue
    async fn update_issue(&self, id: &str, params: &UpdateIssueParams) -> BackendResult<Issue>;

    /// Delete an issue, reporting whether Linear accepted the deletion
    async fn delete_issue(&self, id: &str) -> BackendResult<bool>;

    /// Assign an issue, or unassign it when `assignee_id` is `None`
    async fn assign_issue(&self, issue_id: &str, assignee_id: Option<&str>)
        -> BackendResult<Issue>;

    /// Comments on an issue
    async fn get_comments(&self, issue_id: &str, limit: u32) -> BackendResult<Vec<Comment>>;

    /// Post a comment on an issue
    async fn create_comment(&self, issue_id: &str, body: &str) -> BackendResult<Comment>;

    /// All issue labels in the workspace
    async fn get_labels(&self) -> BackendResult<Vec<Label>>;

    /// Attach a label to an issue
    async fn add_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue>;

    /// Detach a label from an issue
    async fn remove_issue_label(&self, issue_id: &str, label_id: &str) -> BackendResult<Issue>;

    /// Workspace users
    async fn get_users(&self, limit: u32) -> BackendResult<Vec<User>>;

    /// A single user
    async fn get_user(&self, id: &str) -> BackendResult<User>;

    /// The user owning the API key
    async fn get_viewer(&self) -> BackendResult<User>;

    /// All teams
    async fn get_teams(&self) -> BackendResult<Vec<Team>>;

    /// A single team with its members
    async fn get_team(&self, id: &str) -> BackendResult<Team>;

    /// Members of a team
    async fn get_team_members(&self, team_id: &str) -> BackendResult<Vec<User>>;

    /// Projects
    async fn get_projects(&self, limit: u32) -> BackendResult<Vec<Project>>;

    /// A single project
    async fn get_project(&self, id: &str) -> BackendResult<Project>;

    /// Create a project
    async fn create_project(&self, params: &CreateProjectParams) -> BackendResult<Project>;

    /// Issues filed under a project
    async fn get_project_issues(&self, project_id: &str, limit: u32)
        -> BackendResult<Vec<Issue>>;

    /// Move an issue into a project
    async fn add_issue_to_project(&self, issue_id: &str, project_id: &str)
        -> BackendResult<Issue>;

    /// Status updates posted on a project
    async fn get_project_updates(
        &self,
        project_id: &str,
        limit: u32,
    ) -> BackendResult<Vec<ProjectUpdate>>;

    /// Post a project status update
    async fn create_project_update(
        &self,
        params: &CreateProjectUpdateParams,
    ) -> BackendResult<ProjectUpdate>;

    /// Cycles, optionally restricted to one team
    async fn get_cycles(&self, team_id: Option<&str>, limit: u32) -> BackendResult<Vec<Cycle>>;

    /// A single cycle
    async fn get_cycle(&self, id: &str) -> BackendResult<Cycle>;

    /// The current cycle of a team, if one is running
    async fn get_active_cycle(&self, team_id: &str) -> BackendResult<Option<Cycle>>;

    /// Create a cycle
    async fn create_cycle(&self, params: &CreateCycleParams) -> BackendResult<Cycle>;

    /// Update the supplied fields of a cycle
    async fn update_cycle(&self, id: &str, params: &UpdateCycleParams) -> BackendResult<Cycle>;

    /// Issues scheduled in a cycle
    async fn get_cycle_issues(&self, cycle_id: &str, limit: u32) -> BackendResult<Vec<Issue>>;

    /// Schedule an issue in a cycle
    async fn add_issue_to_cycle(&self, issue_id: &str, cycle_id: &str) -> BackendResult<Issue>;

    /// Take an issue out of its cycle
    async fn remove_issue_from_cycle(&self, issue_id: &str) -> BackendResult<Issue>;

    /// Roadmaps
    async fn get_roadmaps(&self, limit: u32) -> BackendResult<Vec<Roadmap>>;

    /// A single roadmap
    async fn get_roadmap(&self, id: &str) -> BackendResult<Roadmap>;

    /// Create a roadmap
    async fn create_roadmap(&self, params: &CreateRoadmapParams) -> BackendResult<Roadmap>;

    /// Update the supplied fields of a roadmap
    async fn update_roadmap(&self, id: &str, params: &UpdateRoadmapParams)
        -> BackendResult<Roadmap>;

    /// Webhooks
    async fn get_webhooks(&self, limit: u32) -> BackendResult<Vec<Webhook>>;

    /// Create a webhook
    async fn create_webhook(&self, params: &CreateWebhookParams) -> BackendResult<Webhook>;

    /// Delete a webhook, reporting whether Linear accepted the deletion
    async fn delete_webhook(&self, id: &str) -> BackendResult<bool>;
}
