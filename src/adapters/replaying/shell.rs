//! Replaying adapter for the `ShellExecutor` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, ShellExecutor, ShellOutput};

/// Serves recorded process results.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a replaying executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(
        &self,
        _program: &str,
        _args: &[&str],
        _dir: Option<&Path>,
    ) -> Result<ShellOutput, PortError> {
        replay_result(next_output(&self.replayer, "shell", "run"), "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::{interaction, make_replayer};
    use serde_json::json;

    #[test]
    fn replays_run_output() {
        let replayer = make_replayer(vec![interaction(
            "shell",
            "run",
            json!({"program": "go"}),
            json!({"ok": {"exit_code": 1, "stdout": "{}\n", "stderr": "FAIL"}}),
        )]);
        let shell = ReplayingShellExecutor::new(replayer);

        let output = shell.run("go", &["test"], None).unwrap();
        assert_eq!(output.exit_code, 1);
        assert_eq!(output.stdout, "{}\n");
        assert!(!output.success());
    }

    #[test]
    fn replays_spawn_error() {
        let replayer = make_replayer(vec![interaction(
            "shell",
            "run",
            json!({"program": "go"}),
            json!({"err": "No such file or directory"}),
        )]);
        let shell = ReplayingShellExecutor::new(replayer);
        assert!(shell.run("go", &[], None).is_err());
    }
}
