//! GitHub access for the configured repository.
//!
//! - `client`: authenticated REST calls, following list pagination
//! - `fetch`: commit-window and branch fetching used by the webhook

pub mod client;
pub mod fetch;

pub use client::GithubClient;
pub use fetch::{FetchMode, FetchOutcome, fetch, since_cutoff};
