//! MCP tool definitions
//!
//! Tools are organised in groups that mirror Linear's entities. Each group
//! module exposes a `register_*_tools` function; [`register_group`] maps a
//! [`ToolGroup`] to the right one. The `listTools` and `enableTool` meta tools
//! in [`meta`] are not part of any group.

pub mod comments;
pub mod cycles;
pub mod issues;
pub mod labels;
pub mod meta;
pub mod projects;
pub mod roadmaps;
pub mod teams;
pub mod users;
pub mod webhooks;

use crate::mcp::tool_registry::{RegistryError, ToolRegistry};
use std::fmt;
use std::str::FromStr;

/// A group of related Linear tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolGroup {
    /// Issue lookup, search and mutation
    Issues,
    /// Issue comments
    Comments,
    /// Issue labels
    Labels,
    /// Workspace users
    Users,
    /// Teams and membership
    Teams,
    /// Projects and project updates
    Projects,
    /// Team cycles
    Cycles,
    /// Roadmaps
    Roadmaps,
    /// Webhooks
    Webhooks,
}

impl ToolGroup {
    /// Every group, in registration order
    pub const ALL: [ToolGroup; 9] = [
        ToolGroup::Issues,
        ToolGroup::Comments,
        ToolGroup::Labels,
        ToolGroup::Users,
        ToolGroup::Teams,
        ToolGroup::Projects,
        ToolGroup::Cycles,
        ToolGroup::Roadmaps,
        ToolGroup::Webhooks,
    ];

    /// Lowercase name used on the command line and in `LINEAR_MCP_TOOLS`
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Issues => "issues",
            ToolGroup::Comments => "comments",
            ToolGroup::Labels => "labels",
            ToolGroup::Users => "users",
            ToolGroup::Teams => "teams",
            ToolGroup::Projects => "projects",
            ToolGroup::Cycles => "cycles",
            ToolGroup::Roadmaps => "roadmaps",
            ToolGroup::Webhooks => "webhooks",
        }
    }
}

impl fmt::Display for ToolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ToolGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<_> = ToolGroup::ALL.iter().map(ToolGroup::as_str).collect();
                format!(
                    "unknown tool group '{}', expected one of: {}",
                    s.trim(),
                    valid.join(", ")
                )
            })
    }
}

/// Register every tool of `group`
pub fn register_group(registry: &mut ToolRegistry, group: ToolGroup) -> Result<(), RegistryError> {
    match group {
        ToolGroup::Issues => issues::register_issue_tools(registry),
        ToolGroup::Comments => comments::register_comment_tools(registry),
        ToolGroup::Labels => labels::register_label_tools(registry),
        ToolGroup::Users => users::register_user_tools(registry),
        ToolGroup::Teams => teams::register_team_tools(registry),
        ToolGroup::Projects => projects::register_project_tools(registry),
        ToolGroup::Cycles => cycles::register_cycle_tools(registry),
        ToolGroup::Roadmaps => roadmaps::register_roadmap_tools(registry),
        ToolGroup::Webhooks => webhooks::register_webhook_tools(registry),
    }
}

/// JSON schema fragment shared by list tools
pub(crate) fn limit_property() -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "minimum": 0,
        "description": "Maximum number of results to return",
        "default": crate::linear::DEFAULT_LIMIT
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_group_round_trips_through_str() {
        for group in ToolGroup::ALL {
            assert_eq!(group.to_string().parse::<ToolGroup>(), Ok(group));
        }
        assert_eq!(" Issues ".parse::<ToolGroup>(), Ok(ToolGroup::Issues));
    }

    #[test]
    fn test_unknown_group_lists_valid_names() {
        let err = "gadgets".parse::<ToolGroup>().unwrap_err();
        assert!(err.contains("gadgets"));
        assert!(err.contains("webhooks"));
    }

    #[test]
    fn test_every_group_registers_distinct_tools() {
        let mut registry = ToolRegistry::new();
        for group in ToolGroup::ALL {
            register_group(&mut registry, group).unwrap();
        }
        assert_eq!(registry.len(), 42);
    }
}
