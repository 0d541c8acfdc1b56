//! Deprecation markers in a repository README.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ports::FileSystem;

const README_NAME: &str = "README.md";

const DEPRECATION_MARKERS: [&str; 7] = [
    "DEPRECATED",
    "UNMAINTAINED",
    "NOT MAINTAINED",
    "NO LONGER MAINTAINED",
    "UNSUPPORTED",
    "NOT SUPPORTED",
    "NO LONGER SUPPORTED",
];

/// `readme_` output group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadmeStats {
    /// The README announces the project as abandoned.
    pub deprecated: bool,
}

/// Reads the first `README.md` (any case) found under `dir`.
///
/// # Errors
///
/// Returns an error when `dir` cannot be walked or the README cannot be read.
pub fn find_readme(fs: &dyn FileSystem, dir: &Path) -> Result<Option<String>> {
    let files = fs.walk_files(dir).map_err(|e| Error::Io(std::io::Error::other(e)))?;
    let Some(path) = files.iter().find(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.trim().eq_ignore_ascii_case(README_NAME))
    }) else {
        return Ok(None);
    };
    let content = fs.read_to_string(path).map_err(|e| Error::Io(std::io::Error::other(e)))?;
    Ok(Some(content))
}

/// Checks each marker as written, lowercased and uppercased.
#[must_use]
pub fn is_deprecated(readme: &str) -> bool {
    DEPRECATION_MARKERS.iter().any(|marker| {
        readme.contains(marker)
            || readme.contains(&marker.to_lowercase())
            || readme.contains(&marker.to_uppercase())
    })
}

/// Scans the README under `dir`; a repository without one is not deprecated.
///
/// # Errors
///
/// See [`find_readme`].
pub fn scan_readme(fs: &dyn FileSystem, dir: &Path) -> Result<ReadmeStats> {
    let readme = find_readme(fs, dir)?.unwrap_or_default();
    Ok(ReadmeStats { deprecated: is_deprecated(&readme) })
}
