//! CLI command definitions and handlers

use clap::Subcommand;
use tracing::info;

use crate::core::client::DeeplClient;
use crate::core::config::DeeplConfig;
use crate::mcp::catalog;
use crate::mcp::dispatcher::Dispatcher;
use crate::server::stdio::McpServer;
use crate::server::transport::StdioTransport;

/// Commands for the DeepL MCP server
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// Print the tool catalog as JSON and exit
    Tools,
}

/// Overrides applied on top of the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Upstream base URL, wins over the environment
    pub api_url: Option<String>,
    /// HTTP timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Apply the set overrides to `config`
    pub fn apply(&self, mut config: DeeplConfig) -> DeeplConfig {
        if let Some(url) = &self.api_url {
            config = config.with_endpoint(url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        config
    }
}

/// Handle the serve command
pub async fn handle_serve(overrides: ConfigOverrides) -> anyhow::Result<()> {
    let config = overrides.apply(DeeplConfig::from_env()?);
    info!(
        endpoint = %config.api_endpoint,
        free_tier = config.is_free_key(),
        "Starting DeepL MCP server"
    );

    let dispatcher = Dispatcher::new(DeeplClient::new(config)?);
    let mut server = McpServer::new(StdioTransport::stdio(), dispatcher);

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for interrupt signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Handle the tools command
pub fn handle_tools() -> anyhow::Result<()> {
    let tools = catalog::tool_descriptors();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
