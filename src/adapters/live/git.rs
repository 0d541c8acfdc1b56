//! Live git adapter using the `git` CLI.

use std::path::Path;
use std::process::Command;

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Git adapter that shells out to the `git` binary.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), PortError> {
        let output = Command::new("git").arg("clone").arg(url).arg(dest).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git clone {url} failed: {}", stderr.trim()).into());
        }
        Ok(())
    }

    fn log(&self, repo_dir: &Path) -> Result<String, PortError> {
        let output = Command::new("git")
            .arg(format!("--git-dir={}", repo_dir.join(".git").display()))
            .args(["log", "--pretty=format:%at %ae"])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git log failed: {}", stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
