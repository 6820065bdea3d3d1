//! Main entry point for the DeepL MCP server

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deepl_mcp::cli::commands::{self, Commands, ConfigOverrides};

/// DeepL MCP Server - translation tools over stdio
#[derive(Parser, Debug)]
#[command(name = "deepl-mcp-server", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// DeepL API base URL (defaults to DEEPL_API_URL or the key's tier)
    #[arg(long)]
    api_url: Option<String>,

    /// HTTP request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };

    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("deepl_mcp={},deepl_mcp_server={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = ConfigOverrides {
        api_url: args.api_url,
        timeout_ms: args.timeout_ms,
    };

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::handle_serve(overrides).await?,
        Commands::Tools => commands::handle_tools()?,
    }

    Ok(())
}
