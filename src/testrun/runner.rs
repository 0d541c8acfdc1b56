//! Runs a module's test suite through the shell port.

use std::path::Path;

use super::{DiagnosticPolicy, ModuleTestSummary, TestRunAggregator};
use crate::error::{AggregateError, Error, Result};
use crate::ports::ShellExecutor;

const GO_TEST_ARGS: [&str; 4] = ["test", "-json", "-covermode=atomic", "./..."];

/// Runs `go test -json` in a local copy and aggregates its events.
pub struct GoTestRunner<'a> {
    shell: &'a dyn ShellExecutor,
    policy: DiagnosticPolicy,
}

impl<'a> GoTestRunner<'a> {
    /// Creates a runner over `shell`.
    pub fn new(shell: &'a dyn ShellExecutor, policy: DiagnosticPolicy) -> Self {
        Self { shell, policy }
    }

    /// Runs every package's tests under `module_dir`.
    ///
    /// A non-zero exit is expected when some package failed and is then
    /// reflected in the summary. Any other non-zero exit is a hard failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Process`] when the tool cannot be started or exits
    /// unsuccessfully without reporting a failing package.
    pub fn run(&self, module_dir: &Path) -> Result<(ModuleTestSummary, AggregateError)> {
        let command = format!("go {}", GO_TEST_ARGS.join(" "));
        tracing::debug!(dir = %module_dir.display(), %command, "running tests");

        let output = self
            .shell
            .run("go", &GO_TEST_ARGS, Some(module_dir))
            .map_err(|e| Error::Process { command: command.clone(), message: e.to_string() })?;

        // One shell call is one cassette interaction, so stdout arrives whole.
        let mut aggregator = TestRunAggregator::new(self.policy);
        for line in output.stdout.lines() {
            aggregator.push_line(line);
        }

        if !output.success() && !aggregator.any_failed() {
            return Err(Error::Process {
                command,
                message: format!("exit code {}: {}", output.exit_code, output.stderr.trim()),
            });
        }
        Ok(aggregator.finish())
    }
}
