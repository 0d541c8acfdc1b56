//! Process execution port.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// Exit code of the process (`-1` when killed by a signal).
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args`, optionally inside `dir`, and waits for it.
    ///
    /// A non-zero exit is reported through [`ShellOutput::exit_code`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>)
        -> Result<ShellOutput, PortError>;
}
