//! Recording adapter for the `ShellExecutor` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{PortError, ShellExecutor, ShellOutput};

/// Records process runs while delegating to an inner executor.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Wraps `inner`, logging to `recorder`.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CommandInput<'a> {
    program: &'a str,
    args: &'a [&'a str],
    dir: Option<String>,
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: Option<&Path>,
    ) -> Result<ShellOutput, PortError> {
        let result = self.inner.run(program, args, dir);
        let input = CommandInput { program, args, dir: dir.map(|d| d.display().to_string()) };
        record_result(&self.recorder, "shell", "run", &input, &result);
        result
    }
}
