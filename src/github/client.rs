//! Thin GitHub REST client scoped to the configured repository.
//!
//! Endpoints:
//! - GET /repos/{owner}/{repo}/commits?since=
//! - GET /repos/{owner}/{repo}/commits/{sha}
//! - GET /repos/{owner}/{repo}/branches
//!
//! List endpoints follow `Link: <...>; rel="next"` until the last page.

use reqwest::header::{ACCEPT, HeaderMap, LINK};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RelayConfig;
use crate::error::GithubError;
use crate::models::{CommitStub, GithubBranch, GithubCommit};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const PER_PAGE: &str = "100";

#[derive(Clone, Copy)]
pub struct GithubClient<'a> {
    http: &'a Client,
    config: &'a RelayConfig,
}

impl<'a> GithubClient<'a> {
    pub fn new(http: &'a Client, config: &'a RelayConfig) -> Self {
        Self { http, config }
    }

    pub async fn list_commits_since(&self, since: &str) -> Result<Vec<CommitStub>, GithubError> {
        let url = format!("{}/commits", self.config.repo_url());
        self.get_all_pages(&url, &[("since", since), ("per_page", PER_PAGE), ("page", "1")])
            .await
    }

    pub async fn get_commit(&self, sha: &str) -> Result<GithubCommit, GithubError> {
        let url = format!("{}/commits/{}", self.config.repo_url(), sha);
        let response = self.send(self.http.get(&url), &url).await?;
        Ok(response.json().await?)
    }

    pub async fn list_branches(&self) -> Result<Vec<GithubBranch>, GithubError> {
        let url = format!("{}/branches", self.config.repo_url());
        self.get_all_pages(&url, &[("per_page", PER_PAGE), ("page", "1")])
            .await
    }

    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, GithubError> {
        let mut items = Vec::new();
        let mut current = url.to_string();
        let mut request = self.http.get(url).query(query);

        loop {
            let response = self.send(request, &current).await?;
            let next = next_page(response.headers());
            items.extend(response.json::<Vec<T>>().await?);

            match next {
                Some(next) => {
                    request = self.http.get(&next);
                    current = next;
                }
                None => return Ok(items),
            }
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, GithubError> {
        debug!(url, "GitHub request");

        let response = request
            .bearer_auth(self.config.token.expose_secret())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

/// Target of the `rel="next"` entry of a `Link` header, if any.
fn next_page(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LINK)?
        .to_str()
        .ok()?
        .split(',')
        .find_map(|entry| {
            let (target, params) = entry.split_once(';')?;
            params
                .split(';')
                .any(|param| param.trim() == r#"rel="next""#)
                .then(|| {
                    target
                        .trim()
                        .trim_start_matches('<')
                        .trim_end_matches('>')
                        .to_string()
                })
        })
}
