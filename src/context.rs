//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::adapters::live::{
    LiveClock, LiveFileSystem, LiveGitRepo, LiveHttpClient, LiveShellExecutor,
};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingGitRepo, RecordingHttpClient,
    RecordingShellExecutor,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingGitRepo, ReplayingHttpClient,
    ReplayingShellExecutor,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{
    Clock, FileSystem, GitRepo, HttpClient, HttpResponse, PortError, ShellExecutor, ShellOutput,
};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up live, recording or replaying adapters; collectors
/// only ever see the traits.
pub struct ServiceContext {
    /// Current time.
    pub clock: Box<dyn Clock>,
    /// File reads and directory walks.
    pub fs: Box<dyn FileSystem>,
    /// Clone and log.
    pub git: Box<dyn GitRepo>,
    /// External processes.
    pub shell: Box<dyn ShellExecutor>,
    /// Remote sources.
    pub http: Box<dyn HttpClient>,
}

impl ServiceContext {
    /// Creates a context with real adapters for every port.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live() -> Result<Self, PortError> {
        Ok(Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
            shell: Box::new(LiveShellExecutor),
            http: Box::new(LiveHttpClient::new()?),
        })
    }

    /// Creates a context whose live adapters also record into `session`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] so the
    /// recorders are released.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(session: &RecordingSession) -> Result<Self, PortError> {
        let live = Self::live()?;
        Ok(Self {
            clock: Box::new(RecordingClock::new(live.clock, session.clock.clone())),
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            git: Box::new(RecordingGitRepo::new(live.git, session.git.clone())),
            shell: Box::new(RecordingShellExecutor::new(live.shell, session.shell.clone())),
            http: Box::new(RecordingHttpClient::new(live.http, session.http.clone())),
        })
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so per-port
    /// cursors stay independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        let replayer = || CassetteReplayer::new(&cassette);

        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer())),
            fs: Box::new(ReplayingFileSystem::new(replayer())),
            git: Box::new(ReplayingGitRepo::new(replayer())),
            shell: Box::new(ReplayingShellExecutor::new(replayer())),
            http: Box::new(ReplayingHttpClient::new(replayer())),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(Unconfigured),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(Unconfigured),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(Unconfigured),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(Unconfigured),
            },
            http: match replayers.http {
                Some(r) => Box::new(ReplayingHttpClient::new(r)),
                None => Box::new(Unconfigured),
            },
        })
    }
}

/// Stand-in for a port that has no cassette during replay.
struct Unconfigured;

fn unconfigured(port: &str) -> ! {
    panic!("{port} port not configured in CassetteConfig: no cassette loaded for {port}");
}

impl Clock for Unconfigured {
    fn now(&self) -> DateTime<Utc> {
        unconfigured("clock")
    }
}

impl FileSystem for Unconfigured {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        unconfigured("fs")
    }
    fn exists(&self, _path: &Path) -> bool {
        unconfigured("fs")
    }
    fn walk_files(&self, _root: &Path) -> Result<Vec<PathBuf>, PortError> {
        unconfigured("fs")
    }
}

impl GitRepo for Unconfigured {
    fn clone_repo(&self, _url: &str, _dest: &Path) -> Result<(), PortError> {
        unconfigured("git")
    }
    fn log(&self, _repo_dir: &Path) -> Result<String, PortError> {
        unconfigured("git")
    }
}

impl ShellExecutor for Unconfigured {
    fn run(
        &self,
        _program: &str,
        _args: &[&str],
        _dir: Option<&Path>,
    ) -> Result<ShellOutput, PortError> {
        unconfigured("shell")
    }
}

impl HttpClient for Unconfigured {
    fn get(&self, _url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, PortError> {
        unconfigured("http")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn replaying_context_from_monolithic_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");
        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "http".into(),
                    method: "get".into(),
                    input: json!({"url": "https://api.github.com/repos/a/b"}),
                    output: json!({"ok": {"status": 200, "body": "{}"}}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let resp = ctx.http.get("https://api.github.com/repos/a/b", &[]).unwrap();
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn replaying_from_per_port_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        let clock_path = dir.path().join("clock.cassette.yaml");
        write_cassette(
            &clock_path,
            vec![Interaction {
                seq: 0,
                port: "clock".into(),
                method: "now".into(),
                input: json!(null),
                output: json!("2024-01-01T00:00:00Z"),
            }],
        );

        let config = CassetteConfig { clock: Some(clock_path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified()).unwrap();
        let _ = ctx.git.log(Path::new("/r"));
    }
}
