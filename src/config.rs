//! Collection settings: built-in defaults, then an optional YAML file, then
//! CLI flags and environment.
//!
//! ```yaml
//! storage_dir: /var/cache/import-graph
//! sources:
//!   goreportcard: false
//!   tests: true
//! test_diagnostics: report
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::sources::awesomelists::DEFAULT_AWESOME_LIST_URL;
use crate::testrun::DiagnosticPolicy;

/// Default local clone directory.
pub const DEFAULT_STORAGE_DIR: &str = ".import-graph/git-repos";
/// Default Codecov API host.
pub const DEFAULT_CODECOV_BASE_URL: &str = "api.codecov.io";
/// Default Go Report Card host.
pub const DEFAULT_GOREPORTCARD_BASE_URL: &str = "goreportcard.com";

/// Which optional stages run for every module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SourceSwitches {
    /// Clone and summarize history.
    pub git: bool,
    /// Codecov totals.
    pub codecov: bool,
    /// Go Report Card grade.
    pub goreportcard: bool,
    /// Test and benchmark file scan.
    pub files: bool,
    /// README deprecation scan.
    pub readme: bool,
    /// Awesome list membership.
    pub awesomelists: bool,
    /// GitHub stars.
    pub github: bool,
    /// Run the test suite.
    pub tests: bool,
}

impl Default for SourceSwitches {
    fn default() -> Self {
        Self {
            git: true,
            codecov: true,
            goreportcard: true,
            files: true,
            readme: true,
            awesomelists: true,
            github: true,
            tests: false,
        }
    }
}

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
    /// Where repositories are cloned.
    pub storage_dir: PathBuf,
    /// Enabled stages.
    pub sources: SourceSwitches,
    /// Codecov API host.
    pub codecov_base_url: String,
    /// Go Report Card host.
    pub goreportcard_base_url: String,
    /// Document searched for awesome list mentions.
    pub awesome_list_url: String,
    /// Handling of unusable test events.
    pub test_diagnostics: DiagnosticPolicy,
    /// Token for GitHub API requests.
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            sources: SourceSwitches::default(),
            codecov_base_url: DEFAULT_CODECOV_BASE_URL.to_string(),
            goreportcard_base_url: DEFAULT_GOREPORTCARD_BASE_URL.to_string(),
            awesome_list_url: DEFAULT_AWESOME_LIST_URL.to_string(),
            test_diagnostics: DiagnosticPolicy::default(),
            github_token: None,
        }
    }
}

/// Config as written in YAML; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    storage_dir: Option<PathBuf>,
    sources: Option<RawSources>,
    codecov_base_url: Option<String>,
    goreportcard_base_url: Option<String>,
    awesome_list_url: Option<String>,
    test_diagnostics: Option<DiagnosticPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSources {
    git: Option<bool>,
    codecov: Option<bool>,
    goreportcard: Option<bool>,
    files: Option<bool>,
    readme: Option<bool>,
    awesomelists: Option<bool>,
    github: Option<bool>,
    tests: Option<bool>,
}

impl Config {
    /// Loads `path` over the defaults, or returns the defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("can not read {}: {e}", path.display())))?;
        let mut config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses YAML over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: Option<RawConfig> =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::from_raw(raw.unwrap_or_default()))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let d = Self::default();
        let s = raw.sources.unwrap_or_default();
        let ds = d.sources;
        Self {
            source: None,
            storage_dir: raw.storage_dir.unwrap_or(d.storage_dir),
            sources: SourceSwitches {
                git: s.git.unwrap_or(ds.git),
                codecov: s.codecov.unwrap_or(ds.codecov),
                goreportcard: s.goreportcard.unwrap_or(ds.goreportcard),
                files: s.files.unwrap_or(ds.files),
                readme: s.readme.unwrap_or(ds.readme),
                awesomelists: s.awesomelists.unwrap_or(ds.awesomelists),
                github: s.github.unwrap_or(ds.github),
                tests: s.tests.unwrap_or(ds.tests),
            },
            codecov_base_url: raw.codecov_base_url.unwrap_or(d.codecov_base_url),
            goreportcard_base_url: raw.goreportcard_base_url.unwrap_or(d.goreportcard_base_url),
            awesome_list_url: raw.awesome_list_url.unwrap_or(d.awesome_list_url),
            test_diagnostics: raw.test_diagnostics.unwrap_or(d.test_diagnostics),
            github_token: None,
        }
    }

    /// Picks up `GITHUB_TOKEN` from the environment.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        self
    }
}
