//! Recording session managing one recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Default root for recorded sessions, relative to the working directory.
pub const DEFAULT_CASSETTE_ROOT: &str = ".import-graph/cassettes";

/// Per-port recorders writing into one timestamped directory.
pub struct RecordingSession {
    /// Clock recorder.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Filesystem recorder.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Git recorder.
    pub git: Arc<Mutex<CassetteRecorder>>,
    /// Shell recorder.
    pub shell: Arc<Mutex<CassetteRecorder>>,
    /// HTTP recorder.
    pub http: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates a session under [`DEFAULT_CASSETTE_ROOT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory exists or cannot be created.
    pub fn new() -> Result<Self, String> {
        Self::new_in(Path::new(DEFAULT_CASSETTE_ROOT))
    }

    /// Creates a session in `<root>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory exists or cannot be created.
    pub fn new_in(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = env!("CARGO_PKG_VERSION");
        let make_recorder = |port: &str| {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit)))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            fs: make_recorder("fs"),
            git: make_recorder("git"),
            shell: make_recorder("shell"),
            http: make_recorder("http"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every port's cassette and returns the session directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a write fails.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.git, "git")?;
        finish_one(self.shell, "shell")?;
        finish_one(self.http, "http")?;
        tracing::info!(dir = %self.output_dir.display(), "cassettes written");
        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let root = tempfile::tempdir().unwrap();
        let session = RecordingSession::new_in(root.path()).unwrap();
        assert!(session.output_dir().exists());

        let dir = session.finish().unwrap();
        for port in ["clock", "fs", "git", "shell", "http"] {
            assert!(dir.join(format!("{port}.cassette.yaml")).exists(), "{port} missing");
        }
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let root = tempfile::tempdir().unwrap();
        let session = RecordingSession::new_in(root.path()).unwrap();
        let _held = Arc::clone(&session.http);

        let err = session.finish().unwrap_err();
        assert!(err.contains("http"));
    }
}
