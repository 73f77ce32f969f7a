use clap::{Args, Parser, Subcommand, ValueEnum};
use linear_mcp::ToolGroup;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "linear-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing the Linear API as tools")]
#[command(long_about = "
linear-mcp is an MCP (Model Context Protocol) server for the Linear
project-tracking API. Issues, comments, labels, users, teams, projects,
cycles, roadmaps and webhooks are exposed as tools over stdio.

Example usage:
  linear-mcp serve                          # Run as MCP server
  linear-mcp serve --tools issues,comments  # Only register two tool groups
  linear-mcp tools --format json            # Print the tool catalog
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "LINEAR_MCP_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs linear-mcp as an MCP server on stdin/stdout. LINEAR_API_KEY must be set.

Only listTools and enableTool start enabled; every other tool is registered
disabled so the client can unlock what it needs. Use --enable to switch
specific tools on at startup, or --enable-all to skip the gating.

Exit codes:
  0 - Server shut down cleanly
  1 - Runtime failure
  2 - Configuration or usage error

Example:
  LINEAR_API_KEY=lin_api_... linear-mcp serve --enable getIssue,searchIssues
")]
    Serve(ServeArgs),
    /// Print the tool catalog
    #[command(long_about = "
Prints every tool of the selected groups with its description. No API key
is needed.

Examples:
  linear-mcp tools                          # Table of all tools
  linear-mcp tools --tools cycles --format json
")]
    Tools {
        #[command(flatten)]
        selection: ToolSelection,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Tool group selection shared by `serve` and `tools`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection {
    /// Only register these tool groups (defaults to LINEAR_MCP_TOOLS, then all)
    #[arg(long, value_delimiter = ',', value_parser = parse_group)]
    pub tools: Option<Vec<ToolGroup>>,

    /// Leave these tool groups out
    #[arg(long, value_delimiter = ',', value_parser = parse_group)]
    pub exclude: Vec<ToolGroup>,
}

impl ToolSelection {
    /// Resolve the selected groups, falling back to `configured` and then to every group
    pub fn resolve(&self, configured: Option<Vec<ToolGroup>>) -> Vec<ToolGroup> {
        let selected = self
            .tools
            .clone()
            .or(configured)
            .unwrap_or_else(|| ToolGroup::ALL.to_vec());

        let mut groups: Vec<ToolGroup> = Vec::new();
        for group in selected {
            if !self.exclude.contains(&group) && !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub selection: ToolSelection,

    /// Tools to enable at startup
    #[arg(long, value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Start with every tool enabled
    #[arg(long)]
    pub enable_all: bool,
}

fn parse_group(s: &str) -> Result<ToolGroup, String> {
    s.parse()
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["linear-mcp", "--help"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from_args(["linear-mcp"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from_args([
            "linear-mcp",
            "serve",
            "--tools",
            "issues,comments",
            "--enable",
            "getIssue,createComment",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(
            args.selection.tools,
            Some(vec![ToolGroup::Issues, ToolGroup::Comments])
        );
        assert_eq!(args.enable, vec!["getIssue", "createComment"]);
        assert!(!args.enable_all);
    }

    #[test]
    fn test_unknown_group_rejected() {
        let result = Cli::try_parse_from_args(["linear-mcp", "tools", "--tools", "gadgets"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from_args(["linear-mcp", "-v", "-q", "tools"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_selection_resolution() {
        let selection = ToolSelection {
            tools: None,
            exclude: vec![ToolGroup::Webhooks],
        };
        let groups = selection.resolve(None);
        assert_eq!(groups.len(), ToolGroup::ALL.len() - 1);
        assert!(!groups.contains(&ToolGroup::Webhooks));

        let groups = selection.resolve(Some(vec![ToolGroup::Cycles, ToolGroup::Webhooks]));
        assert_eq!(groups, vec![ToolGroup::Cycles]);

        let selection = ToolSelection {
            tools: Some(vec![ToolGroup::Issues, ToolGroup::Issues]),
            exclude: vec![],
        };
        assert_eq!(
            selection.resolve(Some(vec![ToolGroup::Cycles])),
            vec![ToolGroup::Issues]
        );
    }
}
