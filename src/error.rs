//! Application error types and HTTP response mapping.
//!
//! `AppError` covers every way a webhook request can end early and implements
//! Axum's `IntoResponse` so handlers can use `?` throughout.
//!
//! Error mappings:
//! - `Config` → 500 `{"error": "Environment variables not set correctly."}`
//! - `UnsupportedEvent` → 400 `{"message": "Event not supported"}`
//! - `Github` → 500 `{"error": "Internal Server Error"}`
//! - `Forward` with a downstream status → that status, `{"error": <reason>}`
//! - `Forward` without a response → 500 `{"error": "Internal Server Error"}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;

pub const MISCONFIGURED_MESSAGE: &str = "Environment variables not set correctly.";
pub const UNSUPPORTED_EVENT_MESSAGE: &str = "Event not supported";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub returned {status} for {url}")]
    Status { status: StatusCode, url: String },
}

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("downstream service returned {0}")]
    Status(StatusCode),

    #[error("downstream service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("relay misconfigured: {0}")]
    Config(#[from] ConfigError),

    #[error("unsupported event: {0:?}")]
    UnsupportedEvent(String),

    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

/// Canonical reason phrase for a status, falling back to the bare code.
///
/// The phrase is derived from the code alone: a downstream answering
/// `429 Slow Down` is relayed as `Too Many Requests`, and any custom phrase
/// on the wire is not preserved.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.as_str().to_owned())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": MISCONFIGURED_MESSAGE }),
            ),
            AppError::UnsupportedEvent(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": UNSUPPORTED_EVENT_MESSAGE }),
            ),
            AppError::Forward(ForwardError::Status(status)) => {
                (*status, json!({ "error": status_text(*status) }))
            }
            AppError::Github(_) | AppError::Forward(ForwardError::Transport(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": INTERNAL_ERROR_MESSAGE }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
