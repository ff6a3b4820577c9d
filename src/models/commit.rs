//! Commit DTOs.
//!
//! - `CommitDetail`, `FileChange`: the shape forwarded downstream and echoed
//!   back to the webhook caller
//! - `CommitStub`, `GithubCommit` and friends: GitHub wire shapes, reduced
//!   with `From` into the forwarded shape

use serde::{Deserialize, Serialize};

/// Commit as forwarded downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    pub author: String,
    /// ISO-8601 author date, passed through as GitHub reports it.
    pub date: String,
    pub message: String,
    pub files: Vec<FileChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    /// Absent for binary files and very large diffs.
    pub patch: Option<String>,
}

/// Entry of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitStub {
    pub sha: String,
}

/// Body of `GET /repos/{owner}/{repo}/commits/{sha}`, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubCommit {
    pub sha: String,
    pub commit: GithubCommitData,
    #[serde(default)]
    pub files: Vec<GithubFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubCommitData {
    pub author: GithubSignature,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubSignature {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubFile {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
    pub patch: Option<String>,
}

impl From<GithubFile> for FileChange {
    fn from(file: GithubFile) -> Self {
        FileChange {
            filename: file.filename,
            additions: file.additions,
            deletions: file.deletions,
            changes: file.changes,
            patch: file.patch,
        }
    }
}

impl From<GithubCommit> for CommitDetail {
    fn from(commit: GithubCommit) -> Self {
        CommitDetail {
            sha: commit.sha,
            author: commit.commit.author.name,
            date: commit.commit.author.date,
            message: commit.commit.message,
            files: commit.files.into_iter().map(FileChange::from).collect(),
        }
    }
}
