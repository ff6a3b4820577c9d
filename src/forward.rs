//! Forwarding of commit details to the downstream calendar service.
//!
//! POST {DOWNSTREAM_BASE_URL}/api/updatenotioncalendar with the commit list
//! as a JSON array. The call is unauthenticated.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::RelayConfig;
use crate::error::ForwardError;
use crate::models::CommitDetail;

pub struct Forwarder<'a> {
    http: &'a Client,
    url: String,
}

impl<'a> Forwarder<'a> {
    pub fn new(http: &'a Client, config: &RelayConfig) -> Self {
        Self {
            http,
            url: config.forward_url(),
        }
    }

    /// Posts `commits` and returns the downstream body: parsed JSON when it
    /// is JSON, a string otherwise, `null` when empty.
    pub async fn forward(&self, commits: &[CommitDetail]) -> Result<Value, ForwardError> {
        debug!(url = %self.url, count = commits.len(), "Forwarding commits");

        let response = self.http.post(&self.url).json(commits).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status));
        }

        let text = response.text().await?;
        Ok(parse_body(text))
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
