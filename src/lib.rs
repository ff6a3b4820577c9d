//! # commit-relay
//!
//! Webhook receiver that turns GitHub push events into calendar updates.
//!
//! ## How it works
//!
//! 1. GitHub (or any caller) sends `POST /api/webhook` with an `X-GitHub-Event`
//!    header.
//! 2. For `push`, the relay lists commits from the last five minutes, fetches
//!    each commit's detail concurrently, and posts the list to
//!    `{DOWNSTREAM_BASE_URL}/api/updatenotioncalendar`.
//! 3. For `getBranch`, it answers with the repository's branch names.
//!
//! See `config` for the environment variables.

pub mod config;
pub mod error;
pub mod forward;
pub mod github;
pub mod models;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;

use config::{ConfigError, RelayConfig};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// State shared by every request. A config error is kept rather than fatal so
/// requests can be answered with the misconfiguration response.
pub struct AppState {
    pub config: Result<RelayConfig, ConfigError>,
    pub http: reqwest::Client,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Result<RelayConfig, ConfigError>) -> reqwest::Result<Self> {
        let timeout = config.as_ref().ok().and_then(|c| c.http_timeout);
        let http = build_http_client(timeout)?;
        Ok(Self { config, http })
    }
}

pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

pub fn create_app(state: SharedState) -> Router {
    routes::create_router(state).layer(TraceLayer::new_for_http())
}
