use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const ENV_VARS: [&str; 4] = [
    "LINEAR_API_KEY",
    "LINEAR_MCP_TOOLS",
    "LINEAR_MCP_LOG_FILE",
    "LOG_LEVEL",
];

/// Command for the binary with the environment it reads cleared
fn linear_mcp() -> Command {
    let mut cmd = Command::cargo_bin("linear-mcp").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    linear_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("tools"));
}

#[test]
fn test_version() {
    linear_mcp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_tools_json_for_selected_groups() {
    let output = linear_mcp()
        .args(["tools", "--format", "json", "--tools", "issues,comments"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 2 + 9 + 2);
    assert_eq!(entries[0]["name"], "listTools");
    assert!(entries
        .iter()
        .all(|e| ["meta", "issues", "comments"].contains(&e["group"].as_str().unwrap())));
}

#[test]
fn test_tools_respects_env_selection_and_exclude() {
    let output = linear_mcp()
        .env("LINEAR_MCP_TOOLS", "cycles,webhooks")
        .args(["tools", "--format", "json", "--exclude", "webhooks"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 2 + 8);
}

#[test]
fn test_tools_table() {
    linear_mcp()
        .args(["tools", "--tools", "labels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("addIssueLabel"))
        .stdout(predicate::str::contains("enableTool"));
}

#[test]
fn test_unknown_group_is_usage_error() {
    linear_mcp()
        .args(["tools", "--tools", "gadgets"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown tool group 'gadgets'"));
}

#[test]
fn test_serve_without_api_key_exits_with_usage_code() {
    linear_mcp()
        .arg("serve")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
}

#[test]
fn test_serve_rejects_unknown_enable_name() {
    linear_mcp()
        .env("LINEAR_API_KEY", "lin_api_test")
        .args(["serve", "--tools", "comments", "--enable", "getIssue"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Tool 'getIssue' not found"));
}

#[test]
fn test_invalid_log_level_is_usage_error() {
    linear_mcp()
        .env("LOG_LEVEL", "chatty")
        .arg("tools")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LOG_LEVEL"));
}

#[test]
fn test_log_file_receives_logs() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("linear-mcp.log");

    linear_mcp()
        .arg("serve")
        .arg("--log-file")
        .arg(&log_file)
        .write_stdin("")
        .assert()
        .code(2);

    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("LINEAR_API_KEY"));
}
