//! labeler-server - webhook service that applies OWNERS-declared labels to
//! pull requests.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN` - API token used for tracker reads and label writes
//! - `GITHUB_API_URL` - API host override (GitHub Enterprise)
//! - `WEBHOOK_SECRET` - shared secret for webhook signature verification;
//!   verification is skipped when unset
//! - `PORT` - listen port

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github::GitHubClient;
use labeler::server::{router, AppState};
use owners::GitHubOwnersLoader;

/// Webhook service that applies OWNERS-declared labels to pull requests.
#[derive(Parser)]
#[command(name = "labeler-server")]
#[command(about = "Applies OWNERS-declared labels to pull requests")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub API base URL (override for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,

    /// Webhook shared secret for signature verification
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    webhook_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = Arc::new(
        GitHubClient::with_base_url(&cli.github_api_url, cli.github_token)
            .context("failed to build GitHub client")?,
    );

    let state = Arc::new(AppState {
        tracker: client.clone(),
        owners: Arc::new(GitHubOwnersLoader::new(client)),
        webhook_secret: cli.webhook_secret,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    info!(%addr, "labeler-server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
