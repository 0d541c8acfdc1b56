//! Replaying adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{GitRepo, PortError};

/// Serves recorded git outcomes.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn clone_repo(&self, _url: &str, _dest: &Path) -> Result<(), PortError> {
        replay_result(next_output(&self.replayer, "git", "clone_repo"), "git::clone_repo")
    }

    fn log(&self, _repo_dir: &Path) -> Result<String, PortError> {
        replay_result(next_output(&self.replayer, "git", "log"), "git::log")
    }
}
