#![forbid(unsafe_code)]

//! Stashwatch MCP server
//!
//! Serves Logstash diagnostics to MCP clients over stdio.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stashwatch_mcp::{McpServer, ServerConfig};

/// Logstash monitoring MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the Logstash monitoring API
    #[arg(long, env = "LOGSTASH_API_BASE")]
    url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stashwatch=debug".into()),
        )
        .init();

    let config = ServerConfig::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_url_override(args.url);
    config.validate().context("invalid configuration")?;

    let mut server = McpServer::from_config(&config).context("failed to build server")?;
    tracing::info!(
        url = %config.logstash_url,
        tools = server.tool_count(),
        "Stashwatch MCP server listening on stdio"
    );

    server.serve_stdio().await?;
    tracing::info!("Stashwatch MCP server stopped");
    Ok(())
}
