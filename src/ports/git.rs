//! Git port: local copies of source repositories and their commit logs.

use std::path::Path;

use super::PortError;

/// Access to git repositories.
pub trait GitRepo: Send + Sync {
    /// Clones `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone cannot be started or does not succeed.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), PortError>;

    /// Returns the commit log of the repository at `repo_dir`, newest first,
    /// one `"<unix author time> <author email>"` line per commit.
    ///
    /// # Errors
    ///
    /// Returns an error if `git log` cannot be run or exits unsuccessfully.
    fn log(&self, repo_dir: &Path) -> Result<String, PortError>;
}
