//! Commit history reduction and local repository storage.

pub mod log;
pub mod storage;

pub use log::{parse_log, summarize, GitLogEntry, GitSummary};
pub use storage::RepoStorage;
