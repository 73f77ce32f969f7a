//! The `tools` command: print the tool catalog

use crate::cli::OutputFormat;
use is_terminal::IsTerminal;
use linear_mcp::mcp::tools::meta::register_meta_tools;
use linear_mcp::mcp::tools::register_group;
use linear_mcp::{RegistryError, ToolGroup, ToolRegistry};
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Style},
    Table, Tabled,
};

/// One catalog line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct CatalogEntry {
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "Group")]
    pub group: &'static str,
    #[tabled(rename = "Description")]
    pub description: &'static str,
}

/// Group label used for `listTools` and `enableTool`
pub const META_GROUP: &str = "meta";

/// Every tool a server with `groups` would register, in registration order
pub fn catalog(groups: &[ToolGroup]) -> Result<Vec<CatalogEntry>, RegistryError> {
    let mut registry = ToolRegistry::new();
    register_meta_tools(&mut registry)?;
    let mut entries = summarize(&registry, META_GROUP);

    for group in groups {
        let mut registry = ToolRegistry::new();
        register_group(&mut registry, *group)?;
        entries.extend(summarize(&registry, group.as_str()));
    }
    Ok(entries)
}

fn summarize(registry: &ToolRegistry, group: &'static str) -> Vec<CatalogEntry> {
    registry
        .list()
        .into_iter()
        .map(|summary| CatalogEntry {
            name: summary.name,
            group,
            description: summary.description,
        })
        .collect()
}

pub fn run_tools_command(groups: &[ToolGroup], format: OutputFormat) -> anyhow::Result<()> {
    let entries = catalog(groups)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => display_table(&entries),
    }
    Ok(())
}

fn display_table(entries: &[CatalogEntry]) {
    let mut table = Table::new(entries);
    table.with(Style::modern());

    if io::stdout().is_terminal() {
        table.with(Modify::new(Rows::one(0)).with(Color::FG_BRIGHT_CYAN));
    }
    table.with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_starts_with_meta_tools() {
        let entries = catalog(&[ToolGroup::Comments]).unwrap();
        let names: Vec<_> = entries.iter().map(|e| (e.group, e.name)).collect();
        assert_eq!(
            names,
            vec![
                (META_GROUP, "listTools"),
                (META_GROUP, "enableTool"),
                ("comments", "getComments"),
                ("comments", "createComment"),
            ]
        );
    }

    #[test]
    fn test_full_catalog_size() {
        let entries = catalog(&ToolGroup::ALL).unwrap();
        assert_eq!(entries.len(), 44);
    }
}
