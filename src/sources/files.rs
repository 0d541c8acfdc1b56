//! Test and benchmark presence in a local copy.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ports::FileSystem;

const TEST_FILE_SUFFIX: &str = "_test.go";

/// `files_` output group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileScanStats {
    /// Some test file declares a `func Test...`.
    pub has_tests: bool,
    /// Some test file declares a `func Bench...`.
    pub has_benchmarks: bool,
}

/// Scans every `_test.go` file under `dir`, stopping once both markers
/// have been seen. Unreadable files are skipped.
///
/// # Errors
///
/// Returns an error when `dir` cannot be walked.
pub fn scan_files(fs: &dyn FileSystem, dir: &Path) -> Result<FileScanStats> {
    let files = fs.walk_files(dir).map_err(|e| Error::Io(std::io::Error::other(e)))?;
    let mut stats = FileScanStats::default();

    for path in files.iter().filter(|p| is_test_file(p)) {
        let Ok(content) = fs.read_to_string(path) else {
            tracing::debug!(path = %path.display(), "skipping unreadable test file");
            continue;
        };
        for line in content.lines() {
            stats.has_tests |= line.starts_with("func Test");
            stats.has_benchmarks |= line.starts_with("func Bench");
        }
        if stats.has_tests && stats.has_benchmarks {
            break;
        }
    }
    Ok(stats)
}

fn is_test_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX))
}
