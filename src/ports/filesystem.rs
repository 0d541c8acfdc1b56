//! Filesystem port for inspecting local repository copies.

use std::path::{Path, PathBuf};

use super::PortError;

/// Read-only filesystem access.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists every regular file below `root`, recursively, sorted by path.
    /// `.git` directories are not descended into.
    ///
    /// The listing is produced up front so callers can run an early-return
    /// search over it.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be read.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError>;
}
