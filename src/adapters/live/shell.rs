//! Live shell executor using `std::process::Command`.

use std::path::Path;
use std::process::Command;

use crate::ports::shell::{ShellExecutor, ShellOutput};
use crate::ports::PortError;

/// Runs programs directly, without an intermediate shell.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        dir: Option<&Path>,
    ) -> Result<ShellOutput, PortError> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        let output = command.output()?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_program_with_args() {
        let result = LiveShellExecutor.run("echo", &["hello"], None).unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn runs_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();

        let result = LiveShellExecutor.run("ls", &[], Some(dir.path())).unwrap();
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn captures_exit_code() {
        let result = LiveShellExecutor.run("sh", &["-c", "exit 42"], None).unwrap();
        assert_eq!(result.exit_code, 42);
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(LiveShellExecutor.run("definitely-not-a-real-program-xyz", &[], None).is_err());
    }
}
