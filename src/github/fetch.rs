//! Commit and branch fetching for a webhook request.
//!
//! Commit mode lists commits from the last five minutes, then fetches the
//! detail of each one concurrently. At most `concurrency` detail requests are
//! in flight; results come back in list order and the first failure aborts
//! the batch.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use super::GithubClient;
use crate::error::GithubError;
use crate::models::{BranchList, CommitDetail};

pub const SINCE_WINDOW_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Recent commits with per-file detail.
    Commits,
    /// Branch names only.
    Branches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Commits(Vec<CommitDetail>),
    Branches(BranchList),
}

/// ISO-8601 UTC cutoff for the commit listing, e.g. `2024-05-01T11:55:00.000Z`.
pub fn since_cutoff(now: DateTime<Utc>) -> String {
    (now - Duration::minutes(SINCE_WINDOW_MINUTES)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn fetch(
    client: &GithubClient<'_>,
    mode: FetchMode,
    concurrency: usize,
) -> Result<FetchOutcome, GithubError> {
    match mode {
        FetchMode::Commits => {
            let since = since_cutoff(Utc::now());
            fetch_commit_details(client, &since, concurrency)
                .await
                .map(FetchOutcome::Commits)
        }
        FetchMode::Branches => {
            let branches = client.list_branches().await?;
            Ok(FetchOutcome::Branches(branches.into_iter().collect()))
        }
    }
}

async fn fetch_commit_details(
    client: &GithubClient<'_>,
    since: &str,
    concurrency: usize,
) -> Result<Vec<CommitDetail>, GithubError> {
    let stubs = client.list_commits_since(since).await?;
    debug!(since, count = stubs.len(), "Listed recent commits");

    let client = *client;
    stream::iter(stubs)
        .map(|stub| async move {
            client
                .get_commit(&stub.sha)
                .await
                .map(CommitDetail::from)
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration as StdDuration;

    fn config(server: &MockServer) -> RelayConfig {
        let api = server.base_url();
        RelayConfig::from_lookup(|key| match key {
            "GITHUB_OWNER" => Some("octo".into()),
            "GITHUB_REPO" => Some("planner".into()),
            "GITHUB_TOKEN" => Some("ghp_test".into()),
            "DOWNSTREAM_BASE_URL" => Some("http://downstream.invalid".into()),
            "GITHUB_API_URL" => Some(api.clone()),
            _ => None,
        })
        .unwrap()
    }

    fn detail_body(sha: &str, author: &str) -> serde_json::Value {
        json!({
            "sha": sha,
            "commit": {
                "author": { "name": author, "date": "2024-05-01T12:00:00Z" },
                "message": format!("commit {sha}")
            },
            "files": [
                { "filename": "README.md", "additions": 1, "deletions": 0, "changes": 1, "patch": "+hi" }
            ]
        })
    }

    #[test]
    fn cutoff_is_five_minutes_back_in_millis_utc() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.250Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(since_cutoff(now), "2024-05-01T11:55:00.250Z");
    }

    #[test]
    fn cutoff_round_trips_as_rfc3339() {
        let now = Utc::now();
        let parsed = DateTime::parse_from_rfc3339(&since_cutoff(now)).unwrap();
        let offset = now.signed_duration_since(parsed.with_timezone(&Utc));

        assert!((offset - Duration::minutes(5)).num_milliseconds().abs() < 1);
    }

    #[tokio::test]
    async fn details_keep_list_order_when_completion_order_differs() {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/octo/planner/commits")
                    .query_param_exists("since")
                    .header("authorization", "Bearer ghp_test");
                then.status(200)
                    .json_body(json!([{ "sha": "aaa" }, { "sha": "bbb" }, { "sha": "ccc" }]));
            })
            .await;
        // The first commit answers last.
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits/aaa");
                then.status(200)
                    .delay(StdDuration::from_millis(300))
                    .json_body(detail_body("aaa", "Ada"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits/bbb");
                then.status(200).json_body(detail_body("bbb", "Brian"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits/ccc");
                then.status(200).json_body(detail_body("ccc", "Cleo"));
            })
            .await;

        let config = config(&server);
        let http = reqwest::Client::new();
        let client = GithubClient::new(&http, &config);

        let outcome = fetch(&client, FetchMode::Commits, 8).await.unwrap();

        list.assert_async().await;
        let FetchOutcome::Commits(commits) = outcome else {
            panic!("expected commits");
        };
        let order: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(order, ["aaa", "bbb", "ccc"]);
        assert_eq!(commits[0].author, "Ada");
        assert_eq!(commits[2].files[0].patch.as_deref(), Some("+hi"));
    }

    #[tokio::test]
    async fn single_failed_detail_fails_whole_fetch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits");
                then.status(200).json_body(json!([{ "sha": "aaa" }, { "sha": "bbb" }]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits/aaa");
                then.status(200).json_body(detail_body("aaa", "Ada"));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits/bbb");
                then.status(502);
            })
            .await;

        let config = config(&server);
        let http = reqwest::Client::new();
        let client = GithubClient::new(&http, &config);

        let err = fetch(&client, FetchMode::Commits, 2).await.unwrap_err();

        match err {
            GithubError::Status { status, url } => {
                assert_eq!(status.as_u16(), 502);
                assert!(url.ends_with("/repos/octo/planner/commits/bbb"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_window_yields_no_commits() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits");
                then.status(200).json_body(json!([]));
            })
            .await;

        let config = config(&server);
        let http = reqwest::Client::new();
        let client = GithubClient::new(&http, &config);

        let outcome = fetch(&client, FetchMode::Commits, 4).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Commits(Vec::new()));
    }

    #[tokio::test]
    async fn branch_mode_lists_names_without_touching_commits() {
        let server = MockServer::start_async().await;
        let commits = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/octo/planner/commits");
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/octo/planner/branches")
                    .header("authorization", "Bearer ghp_test");
                then.status(200).json_body(json!([
                    { "name": "main", "protected": true },
                    { "name": "feature/calendar", "protected": false }
                ]));
            })
            .await;

        let config = config(&server);
        let http = reqwest::Client::new();
        let client = GithubClient::new(&http, &config);

        let outcome = fetch(&client, FetchMode::Branches, 4).await.unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Branches(BranchList {
                branches: vec!["main".into(), "feature/calendar".into()],
            })
        );
        commits.assert_hits_async(0).await;
    }
}
