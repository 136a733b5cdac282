//! Workspace Builder server
//!
//! Serves the single-page workspace builder and drives the remote
//! browser-automation service for submissions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use workspace_builder::automation::{AutomationConfig, HttpAutomationClient};
use workspace_builder::builder::{BuilderConfig, WorkspaceBuilder};
use workspace_builder::handlers::AppState;
use workspace_builder::server;

/// Workspace Builder server
#[derive(Parser, Debug)]
#[command(name = "workspace-builder")]
#[command(version)]
#[command(about = "Single-page workspace builder over a remote automation service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Base URL of the remote automation API
    #[arg(long, default_value = "https://api.multion.ai/v1")]
    automation_url: String,

    /// Search engine start page for sessions
    #[arg(long, default_value = "https://www.google.com")]
    start_url: String,

    /// Search engine domain excluded from results
    #[arg(long, default_value = "google.com")]
    search_domain: String,

    /// How many ranked results to request per submission
    #[arg(long, default_value = "5")]
    result_count: usize,

    /// Pause between ranked extraction steps, in milliseconds
    #[arg(long, default_value = "1000")]
    step_delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Credential presence (not value) is part of startup diagnostics.
    let automation_config = AutomationConfig::from_env(&args.automation_url);
    let client =
        HttpAutomationClient::new(automation_config).context("failed to build automation client")?;

    let builder_config = BuilderConfig::builder()
        .start_url(&args.start_url)
        .search_domain(&args.search_domain)
        .result_count(args.result_count)
        .step_delay(Duration::from_millis(args.step_delay_ms))
        .build();
    let builder = WorkspaceBuilder::new(Arc::new(client), builder_config);
    let state = Arc::new(AppState::new(builder));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid host/port")?;

    tracing::info!(
        "Workspace Builder starting on {}:{}",
        args.host,
        args.port
    );

    server::serve(state, addr).await.context("server error")?;
    Ok(())
}
