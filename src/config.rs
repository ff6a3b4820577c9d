//! Relay configuration resolved from the environment.
//!
//! Required:
//! - `GITHUB_OWNER`, `GITHUB_REPO`: repository to watch
//! - `GITHUB_TOKEN`: bearer token for the GitHub REST API
//! - `DOWNSTREAM_BASE_URL`: base URL of the calendar update service
//!
//! Optional:
//! - `GITHUB_API_URL` (default `https://api.github.com`)
//! - `RELAY_FETCH_CONCURRENCY` (default 8)
//! - `RELAY_HTTP_TIMEOUT_SECS` (unset = no timeout)

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

const REQUIRED_VARS: [&str; 4] = [
    "GITHUB_OWNER",
    "GITHUB_REPO",
    "GITHUB_TOKEN",
    "DOWNSTREAM_BASE_URL",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[derive(Debug)]
pub struct RelayConfig {
    pub owner: String,
    pub repo: String,
    pub token: SecretString,
    pub downstream_base_url: String,
    pub github_api_url: String,
    pub fetch_concurrency: usize,
    pub http_timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the config from an arbitrary key lookup. Empty or
    /// whitespace-only values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        // Presence was checked above.
        let required = |key: &str| get(key).unwrap_or_default();

        let fetch_concurrency =
            positive::<usize>("RELAY_FETCH_CONCURRENCY", get("RELAY_FETCH_CONCURRENCY"))
                .unwrap_or(DEFAULT_FETCH_CONCURRENCY);

        let http_timeout = positive::<u64>("RELAY_HTTP_TIMEOUT_SECS", get("RELAY_HTTP_TIMEOUT_SECS"))
            .map(Duration::from_secs);

        Ok(Self {
            owner: required("GITHUB_OWNER"),
            repo: required("GITHUB_REPO"),
            token: SecretString::from(required("GITHUB_TOKEN")),
            downstream_base_url: trim_base(required("DOWNSTREAM_BASE_URL")),
            github_api_url: trim_base(
                get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            ),
            fetch_concurrency,
            http_timeout,
        })
    }

    pub fn forward_url(&self) -> String {
        format!("{}/api/updatenotioncalendar", self.downstream_base_url)
    }

    pub fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.github_api_url, self.owner, self.repo)
    }
}

/// Parses an optional positive integer. Unparsable or zero values are logged
/// and treated as unset.
fn positive<T>(key: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = raw?;
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            warn!(var = key, value = %raw, "Ignoring invalid value, using default");
            None
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
