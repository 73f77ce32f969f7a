use std::process;
mod cli;
mod error;
mod exit_codes;
mod logging;
mod serve;
mod tools;

use clap::CommandFactory;
use cli::{Cli, Commands};
use error::handle_cli_result;
use exit_codes::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let Some(command) = cli.command else {
        let code = match Cli::command().print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
        process::exit(code);
    };

    let configured = match linear_mcp::config::log_level_from_env() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_USAGE);
        }
    };
    let level = logging::effective_level(cli.verbose, cli.quiet, configured);
    if let Err(e) = logging::init_logging(level, cli.log_file.as_deref()) {
        eprintln!("Error: failed to open log file: {e}");
        process::exit(EXIT_USAGE);
    }

    let exit_code = match command {
        Commands::Serve(args) => {
            tracing::info!("Starting MCP server");
            handle_cli_result(serve::run_serve(args).await)
        }
        Commands::Tools { selection, format } => run_tools(selection, format),
    };

    process::exit(exit_code);
}

fn run_tools(selection: cli::ToolSelection, format: cli::OutputFormat) -> i32 {
    let configured = match linear_mcp::config::tool_groups_from_env() {
        Ok(groups) => groups,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_USAGE;
        }
    };

    match tools::run_tools_command(&selection.resolve(configured), format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Tools error: {}", e);
            EXIT_FAILURE
        }
    }
}
