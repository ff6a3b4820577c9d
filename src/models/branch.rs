//! Branch DTOs.
//!
//! - `BranchList`: response body of the `getBranch` event
//! - `GithubBranch`: one entry of the GitHub branch listing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchList {
    pub branches: Vec<String>,
}

/// Entry of `GET /repos/{owner}/{repo}/branches`.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubBranch {
    pub name: String,
}

impl FromIterator<GithubBranch> for BranchList {
    fn from_iter<I: IntoIterator<Item = GithubBranch>>(iter: I) -> Self {
        BranchList {
            branches: iter.into_iter().map(|b| b.name).collect(),
        }
    }
}
