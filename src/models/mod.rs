//! Data transfer objects.
//!
//! - `commit`: CommitDetail, FileChange, plus the GitHub commit wire shapes
//! - `branch`: BranchList and the GitHub branch wire shape
//! - `response`: bodies returned by the webhook endpoint

pub mod branch;
pub mod commit;
pub mod response;

pub use branch::*;
pub use commit::*;
pub use response::*;
