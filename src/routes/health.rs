//! Liveness endpoint.
//!
//! - GET /health
//!   Reports `{"status": "ok", "configured": bool}` without calling out.
//!   Used by: deployment health checks, to tell a running but unconfigured
//!   relay apart from a ready one

use axum::{Json, Router, extract::State, routing::get};

use crate::SharedState;
use crate::models::HealthResponse;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        configured: state.config.is_ok(),
    })
}
