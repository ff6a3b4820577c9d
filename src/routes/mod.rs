//! HTTP route handlers.
//!
//! - `webhook`: event dispatch (POST /api/webhook, POST /)
//! - `health`: liveness and config status (GET /health)

pub mod health;
pub mod webhook;

use axum::Router;

use crate::SharedState;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(webhook::routes(state.clone()))
        .merge(health::routes(state))
}
