//! Recording adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{GitRepo, PortError};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Wraps `inner`, logging to `recorder`.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CloneInput<'a> {
    url: &'a str,
    dest: String,
}

#[derive(Serialize)]
struct LogInput {
    repo_dir: String,
}

impl GitRepo for RecordingGitRepo {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), PortError> {
        let result = self.inner.clone_repo(url, dest);
        let input = CloneInput { url, dest: dest.display().to_string() };
        record_result(&self.recorder, "git", "clone_repo", &input, &result);
        result
    }

    fn log(&self, repo_dir: &Path) -> Result<String, PortError> {
        let result = self.inner.log(repo_dir);
        let input = LogInput { repo_dir: repo_dir.display().to_string() };
        record_result(&self.recorder, "git", "log", &input, &result);
        result
    }
}
