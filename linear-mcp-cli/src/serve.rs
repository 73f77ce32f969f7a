//! The `serve` command: run the MCP server on stdio

use crate::cli::ServeArgs;
use crate::error::{CliError, CliResult, IntoCliResult};
use crate::exit_codes::EXIT_FAILURE;
use linear_mcp::{Config, McpServer, ServerOptions};
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;

/// Load configuration, build the registry and serve until the client leaves
/// or the process is interrupted.
pub async fn run_serve(args: ServeArgs) -> CliResult<()> {
    let config = Config::from_env().cli_usage_error()?;

    let options = ServerOptions {
        groups: args.selection.resolve(config.tool_groups.clone()),
        enable: args.enable,
        enable_all: args.enable_all,
    };
    let server = McpServer::from_config(&config, &options)?;
    tracing::info!(
        "Starting {} v{} with tool groups: {}",
        config.server.name,
        config.server.version,
        options
            .groups
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                ct_clone.cancel();
            }
            Err(e) => tracing::warn!("Failed to listen for ctrl+c: {}", e),
        }
    });

    let service = serve_server(server, stdio())
        .await
        .map_err(|e| CliError::new(format!("MCP server error: {e}"), EXIT_FAILURE))?;
    tracing::info!("MCP server started");

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.map_err(|e| CliError::new(format!("MCP server error: {e}"), EXIT_FAILURE))?;
            tracing::info!("MCP server stopped: {:?}", reason);
        }
        _ = ct.cancelled() => {
            tracing::info!("MCP server exited");
        }
    }
    Ok(())
}
