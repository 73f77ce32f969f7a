//! GraphQL documents sent to the Linear API
//!
//! Selection sets shared between documents are kept as `macro_rules!`
//! fragments so every document is a single `&'static str` built at compile
//! time with `concat!`.

macro_rules! issue_fields {
    () => {
        "id identifier title description priority estimate \
         state { id name color } \
         assignee { id name email } \
         labels { nodes { id name color } } \
         team { id name key } \
         project { id name } \
         cycle { id name number } \
         createdAt updatedAt"
    };
}

macro_rules! comment_fields {
    () => {
        "id body user { id name email } issue { id identifier title } createdAt updatedAt"
    };
}

macro_rules! user_fields {
    () => {
        "id name displayName email active admin"
    };
}

macro_rules! team_fields {
    () => {
        "id name key description"
    };
}

macro_rules! project_fields {
    () => {
        "id name description state progress startDate targetDate \
         lead { id name email } \
         teams { nodes { id name key } } \
         createdAt updatedAt"
    };
}

macro_rules! project_update_fields {
    () => {
        "id body health user { id name email } project { id name } createdAt"
    };
}

macro_rules! cycle_fields {
    () => {
        "id name description number startsAt endsAt progress isActive team { id name key }"
    };
}

macro_rules! roadmap_fields {
    () => {
        "id name description color owner { id name email } createdAt updatedAt"
    };
}

macro_rules! webhook_fields {
    () => {
        "id url label enabled resourceTypes team { id name key } createdAt"
    };
}

pub const ISSUE: &str = concat!(
    "query Issue($id: String!) { issue(id: $id) { ",
    issue_fields!(),
    " } }"
);

pub const ISSUES: &str = concat!(
    "query Issues($first: Int) { issues(first: $first) { nodes { ",
    issue_fields!(),
    " } } }"
);

pub const SEARCH_ISSUES: &str = concat!(
    "query SearchIssues($filter: IssueFilter, $first: Int) { ",
    "issues(filter: $filter, first: $first) { nodes { ",
    issue_fields!(),
    " } } }"
);

pub const CREATE_ISSUE: &str = concat!(
    "mutation CreateIssue($input: IssueCreateInput!) { ",
    "issueCreate(input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const UPDATE_ISSUE: &str = concat!(
    "mutation UpdateIssue($id: String!, $input: IssueUpdateInput!) { ",
    "issueUpdate(id: $id, input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const DELETE_ISSUE: &str =
    "mutation DeleteIssue($id: String!) { issueDelete(id: $id) { success } }";

pub const COMMENTS: &str = concat!(
    "query Comments($issueId: String!, $first: Int) { issue(id: $issueId) { ",
    "comments(first: $first) { nodes { ",
    comment_fields!(),
    " } } } }"
);

pub const CREATE_COMMENT: &str = concat!(
    "mutation CreateComment($input: CommentCreateInput!) { ",
    "commentCreate(input: $input) { success comment { ",
    comment_fields!(),
    " } } }"
);

pub const LABELS: &str = "query Labels { issueLabels { nodes { id name color } } }";

pub const USERS: &str = concat!(
    "query Users($first: Int) { users(first: $first) { nodes { ",
    user_fields!(),
    " } } }"
);

pub const USER: &str = concat!(
    "query User($id: String!) { user(id: $id) { ",
    user_fields!(),
    " } }"
);

pub const VIEWER: &str = concat!("query Viewer { viewer { ", user_fields!(), " } }");

pub const TEAMS: &str = concat!("query Teams { teams { nodes { ", team_fields!(), " } } }");

pub const TEAM: &str = concat!(
    "query Team($id: String!) { team(id: $id) { ",
    team_fields!(),
    " members { nodes { id name email } } } }"
);

pub const TEAM_MEMBERS: &str = concat!(
    "query TeamMembers($teamId: String!) { team(id: $teamId) { members { nodes { ",
    user_fields!(),
    " } } } }"
);

pub const PROJECTS: &str = concat!(
    "query Projects($first: Int) { projects(first: $first) { nodes { ",
    project_fields!(),
    " } } }"
);

pub const PROJECT: &str = concat!(
    "query Project($id: String!) { project(id: $id) { ",
    project_fields!(),
    " } }"
);

pub const CREATE_PROJECT: &str = concat!(
    "mutation CreateProject($input: ProjectCreateInput!) { ",
    "projectCreate(input: $input) { success project { ",
    project_fields!(),
    " } } }"
);

pub const PROJECT_ISSUES: &str = concat!(
    "query ProjectIssues($projectId: String!, $first: Int) { project(id: $projectId) { ",
    "issues(first: $first) { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const PROJECT_UPDATES: &str = concat!(
    "query ProjectUpdates($projectId: String!, $first: Int) { project(id: $projectId) { ",
    "projectUpdates(first: $first) { nodes { ",
    project_update_fields!(),
    " } } } }"
);

pub const CREATE_PROJECT_UPDATE: &str = concat!(
    "mutation CreateProjectUpdate($input: ProjectUpdateCreateInput!) { ",
    "projectUpdateCreate(input: $input) { success projectUpdate { ",
    project_update_fields!(),
    " } } }"
);

pub const CYCLES: &str = concat!(
    "query Cycles($filter: CycleFilter, $first: Int) { cycles(filter: $filter, first: $first) { nodes { ",
    cycle_fields!(),
    " } } }"
);

pub const CYCLE: &str = concat!(
    "query Cycle($id: String!) { cycle(id: $id) { ",
    cycle_fields!(),
    " } }"
);

pub const ACTIVE_CYCLE: &str = concat!(
    "query ActiveCycle($teamId: String!) { team(id: $teamId) { activeCycle { ",
    cycle_fields!(),
    " } } }"
);

pub const CREATE_CYCLE: &str = concat!(
    "mutation CreateCycle($input: CycleCreateInput!) { ",
    "cycleCreate(input: $input) { success cycle { ",
    cycle_fields!(),
    " } } }"
);

pub const UPDATE_CYCLE: &str = concat!(
    "mutation UpdateCycle($id: String!, $input: CycleUpdateInput!) { ",
    "cycleUpdate(id: $id, input: $input) { success cycle { ",
    cycle_fields!(),
    " } } }"
);

pub const CYCLE_ISSUES: &str = concat!(
    "query CycleIssues($cycleId: String!, $first: Int) { cycle(id: $cycleId) { ",
    "issues(first: $first) { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const ROADMAPS: &str = concat!(
    "query Roadmaps($first: Int) { roadmaps(first: $first) { nodes { ",
    roadmap_fields!(),
    " } } }"
);

pub const ROADMAP: &str = concat!(
    "query Roadmap($id: String!) { roadmap(id: $id) { ",
    roadmap_fields!(),
    " } }"
);

pub const CREATE_ROADMAP: &str = concat!(
    "mutation CreateRoadmap($input: RoadmapCreateInput!) { ",
    "roadmapCreate(input: $input) { success roadmap { ",
    roadmap_fields!(),
    " } } }"
);

pub const UPDATE_ROADMAP: &str = concat!(
    "mutation UpdateRoadmap($id: String!, $input: RoadmapUpdateInput!) { ",
    "roadmapUpdate(id: $id, input: $input) { success roadmap { ",
    roadmap_fields!(),
    " } } }"
);

pub const WEBHOOKS: &str = concat!(
    "query Webhooks($first: Int) { webhooks(first: $first) { nodes { ",
    webhook_fields!(),
    " } } }"
);

pub const CREATE_WEBHOOK: &str = concat!(
    "mutation CreateWebhook($input: WebhookCreateInput!) { ",
    "webhookCreate(input: $input) { success webhook { ",
    webhook_fields!(),
    " } } }"
);

pub const DELETE_WEBHOOK: &str =
    "mutation DeleteWebhook($id: String!) { webhookDelete(id: $id) { success } }";
