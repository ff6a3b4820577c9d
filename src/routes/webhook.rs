//! Webhook dispatch.
//!
//! POST /api/webhook (and POST /)
//!
//! Routing is driven by the `X-GitHub-Event` header:
//! - `push`: fetch recent commits with detail, forward them downstream,
//!   answer with the downstream body and the commits
//! - `getBranch`: answer with the repository's branch names
//! - anything else: 400
//!
//! The config gate runs before the header is looked at.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{error, info, instrument, warn};

use crate::SharedState;
use crate::error::{AppError, Result};
use crate::forward::Forwarder;
use crate::github::{FetchMode, FetchOutcome, GithubClient, fetch};
use crate::models::PushResponse;

pub const EVENT_HEADER: &str = "x-github-event";

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/webhook", post(handle_webhook))
        .route("/", post(handle_webhook))
        .with_state(state)
}

fn mode_for_event(event: &str) -> Option<FetchMode> {
    match event {
        "push" => Some(FetchMode::Commits),
        "getBranch" => Some(FetchMode::Branches),
        _ => None,
    }
}

#[instrument(
    name = "relay.webhook",
    skip_all,
    fields(event = tracing::field::Empty, commits = tracing::field::Empty)
)]
async fn handle_webhook(State(state): State<SharedState>, headers: HeaderMap) -> Result<Response> {
    let config = state.config.as_ref().map_err(|e| {
        warn!(error = %e, "Rejecting webhook, relay is not configured");
        AppError::Config(e.clone())
    })?;

    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let span = tracing::Span::current();
    span.record("event", event);

    let Some(mode) = mode_for_event(event) else {
        info!("Ignoring unsupported event");
        return Err(AppError::UnsupportedEvent(event.to_string()));
    };

    let github = GithubClient::new(&state.http, config);
    let outcome = fetch(&github, mode, config.fetch_concurrency)
        .await
        .inspect_err(|e| error!(error = %e, "GitHub fetch failed"))?;

    match outcome {
        FetchOutcome::Branches(list) => {
            info!(count = list.branches.len(), "Listed branches");
            Ok(Json(list).into_response())
        }
        FetchOutcome::Commits(commits) => {
            span.record("commits", commits.len() as u64);

            let downstream = Forwarder::new(&state.http, config)
                .forward(&commits)
                .await
                .inspect_err(|e| error!(error = %e, "Forwarding commits failed"))?;

            info!("Forwarded commits downstream");
            Ok(Json(PushResponse::new(downstream, commits)).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_supported_events() {
        assert_eq!(mode_for_event("push"), Some(FetchMode::Commits));
        assert_eq!(mode_for_event("getBranch"), Some(FetchMode::Branches));
    }

    #[test]
    fn rejects_everything_else() {
        for event in ["ping", "", "Push", "getbranch", "pull_request"] {
            assert_eq!(mode_for_event(event), None, "{event:?}");
        }
    }
}
