use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tba_mcp::{transport, Config, McpServer, TbaClient};

#[tokio::main]
async fn main() -> ExitCode {
    // Stdout belongs to the protocol transport; all diagnostics go to
    // stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tba_mcp=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = McpServer::new(TbaClient::new(config));
    info!("The Blue Alliance MCP server running on stdio");

    match transport::serve_stdio(&server).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("transport error: {}", e);
            ExitCode::FAILURE
        }
    }
}
