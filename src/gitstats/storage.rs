//! Local working copies of source repositories.

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Error, Result};
use crate::ports::{FileSystem, GitRepo};

/// Stores clones under `root/<sha256-hex of the URL>`.
#[derive(Debug, Clone)]
pub struct RepoStorage {
    root: PathBuf,
}

impl RepoStorage {
    /// Creates storage rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory a repository is (or will be) cloned into.
    #[must_use]
    pub fn dir_path(&self, url: &Url) -> PathBuf {
        let digest = Sha256::digest(url.as_str().as_bytes());
        self.root.join(hex::encode(digest))
    }

    /// Clones `url` unless its directory already exists, and returns the
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Process`] when the clone fails.
    pub fn fetch(&self, fs: &dyn FileSystem, git: &dyn GitRepo, url: &Url) -> Result<PathBuf> {
        let dir = self.dir_path(url);
        if fs.exists(&dir) {
            tracing::debug!(%url, dir = %dir.display(), "reusing local copy");
            return Ok(dir);
        }
        tracing::debug!(%url, dir = %dir.display(), "cloning");
        git.clone_repo(url.as_str(), &dir).map_err(|e| Error::Process {
            command: format!("git clone {url}"),
            message: e.to_string(),
        })?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;
    use std::path::Path;
    use std::sync::Mutex;

    struct FakeFs {
        present: bool,
    }

    impl FileSystem for FakeFs {
        fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
            Err("unused".into())
        }
        fn exists(&self, _path: &Path) -> bool {
            self.present
        }
        fn walk_files(&self, _root: &Path) -> Result<Vec<PathBuf>, PortError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct FakeGit {
        clones: Mutex<Vec<(String, PathBuf)>>,
        fail: bool,
    }

    impl GitRepo for FakeGit {
        fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), PortError> {
            if self.fail {
                return Err("repository not found".into());
            }
            self.clones.lock().unwrap().push((url.to_string(), dest.to_path_buf()));
            Ok(())
        }
        fn log(&self, _repo_dir: &Path) -> Result<String, PortError> {
            Ok(String::new())
        }
    }

    fn url() -> Url {
        Url::parse("https://github.com/spf13/cobra").unwrap()
    }

    #[test]
    fn dir_path_is_stable_hex_digest() {
        let storage = RepoStorage::new("/var/repos");
        let dir = storage.dir_path(&url());
        assert_eq!(dir, storage.dir_path(&url()));
        let name = dir.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(dir.starts_with("/var/repos"));
    }

    #[test]
    fn fetch_clones_when_absent() {
        let storage = RepoStorage::new("/var/repos");
        let git = FakeGit::default();

        let dir = storage.fetch(&FakeFs { present: false }, &git, &url()).unwrap();
        let clones = git.clones.lock().unwrap();
        assert_eq!(clones.as_slice(), [(url().to_string(), dir)]);
    }

    #[test]
    fn fetch_reuses_existing_copy() {
        let storage = RepoStorage::new("/var/repos");
        let git = FakeGit::default();

        storage.fetch(&FakeFs { present: true }, &git, &url()).unwrap();
        assert!(git.clones.lock().unwrap().is_empty());
    }

    #[test]
    fn clone_failure_is_process_error() {
        let storage = RepoStorage::new("/var/repos");
        let git = FakeGit { fail: true, ..FakeGit::default() };
        let err = storage.fetch(&FakeFs { present: false }, &git, &url()).unwrap_err();
        assert!(matches!(err, Error::Process { .. }));
    }
}
