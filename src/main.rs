//! commit-relay - forwards GitHub push activity to a calendar service
//!
//! # Usage
//! ```bash
//! commit-relay                     # Listen on 0.0.0.0:3000
//! commit-relay --port 8080         # Custom port (or PORT=8080)
//! ```
//!
//! Repository and downstream settings are read from the environment (a
//! `.env` file in the working directory is honoured).

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commit_relay::config::RelayConfig;
use commit_relay::{AppState, create_app};

/// Relay GitHub push events to a calendar update service
#[derive(Parser)]
#[command(name = "commit-relay")]
#[command(about = "Relays GitHub push events to a calendar update service", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env();
    match &config {
        Ok(c) => info!(
            owner = %c.owner,
            repo = %c.repo,
            downstream = %c.downstream_base_url,
            concurrency = c.fetch_concurrency,
            "Configuration loaded"
        ),
        Err(e) => warn!(error = %e, "Webhooks will be rejected until the environment is fixed"),
    }

    let state = Arc::new(AppState::new(config)?);
    let app = create_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Webhook server listening");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
