//! Webhook response bodies.
//!
//! Field names are camelCase because the downstream dashboard consumes them
//! as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CommitDetail;

pub const PUSH_FORWARDED_MESSAGE: &str = "Commits forwarded to calendar service";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    pub message: String,
    /// Downstream body, verbatim.
    pub notion_response: Value,
    pub commits: Vec<CommitDetail>,
}

impl PushResponse {
    pub fn new(notion_response: Value, commits: Vec<CommitDetail>) -> Self {
        Self {
            message: PUSH_FORWARDED_MESSAGE.to_string(),
            notion_response,
            commits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub configured: bool,
}
