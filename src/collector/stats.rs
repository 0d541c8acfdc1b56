//! The per-module output record.

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::gitstats::GitSummary;
use crate::sources::{
    AwesomeListStats, CodecovStats, FileScanStats, GitHubStats, GoReportCardStats, ReadmeStats,
};
use crate::testrun::ModuleTestSummary;

/// `git_` output group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitStats {
    /// Date of the newest commit, `YYYY-MM-DD`.
    pub last_commit: String,
    /// Whole days since the newest commit.
    pub last_commit_days_since: u64,
    /// Distinct authors.
    pub num_contributors: usize,
}

impl From<&GitSummary> for GitStats {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(s: &GitSummary) -> Self {
        Self {
            last_commit: s.last_commit.format("%Y-%m-%d").to_string(),
            last_commit_days_since: s.days_since_last_commit.max(0.0).floor() as u64,
            num_contributors: s.contributor_count,
        }
    }
}

/// Everything collected for one module.
///
/// Starts as identity only and gains groups as sources succeed. A group is
/// `None` when its source was disabled or failed; the matching `can_*` flag
/// in the serialized record tells the two apart from a real `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleStats {
    /// Module identity.
    pub id: String,
    /// Clonable repository.
    pub git_url: Option<Url>,
    /// GitHub page.
    pub github_url: Option<Url>,
    /// History summary.
    pub git: Option<GitStats>,
    /// Codecov totals.
    pub codecov: Option<CodecovStats>,
    /// Go Report Card grade.
    pub goreportcard: Option<GoReportCardStats>,
    /// Test file scan.
    pub files: Option<FileScanStats>,
    /// README scan.
    pub readme: Option<ReadmeStats>,
    /// Awesome list membership.
    pub awesomelists: Option<AwesomeListStats>,
    /// GitHub popularity.
    pub github: Option<GitHubStats>,
    /// Test run summary.
    pub gotest: Option<ModuleTestSummary>,
}

impl ModuleStats {
    /// An identity-only record.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Availability flags in output order.
    #[must_use]
    pub fn availability(&self) -> [(&'static str, bool); 8] {
        [
            ("can_get_git", self.git.is_some()),
            ("can_get_codecov", self.codecov.is_some()),
            ("can_get_goreportcard", self.goreportcard.is_some()),
            ("can_scan_files", self.files.is_some()),
            ("can_scan_readme", self.readme.is_some()),
            ("can_check_awesomelists", self.awesomelists.is_some()),
            ("can_get_github", self.github.is_some()),
            ("can_run_tests", self.gotest.is_some()),
        ]
    }
}

impl Serialize for ModuleStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        for (name, available) in self.availability() {
            map.serialize_entry(name, &available)?;
        }
        if let Some(url) = &self.git_url {
            map.serialize_entry("git_url", url.as_str())?;
        }
        if let Some(url) = &self.github_url {
            map.serialize_entry("github_url", url.as_str())?;
        }
        write_group(&mut map, "git", self.git.as_ref())?;
        write_group(&mut map, "codecov", self.codecov.as_ref())?;
        write_group(&mut map, "goreportcard", self.goreportcard.as_ref())?;
        write_group(&mut map, "files", self.files.as_ref())?;
        write_group(&mut map, "readme", self.readme.as_ref())?;
        write_group(&mut map, "awesomelists", self.awesomelists.as_ref())?;
        write_group(&mut map, "github", self.github.as_ref())?;
        write_group(&mut map, "gotest", self.gotest.as_ref())?;
        map.end()
    }
}

/// Writes a group's fields flat, each key prefixed with `<prefix>_`.
fn write_group<M, T>(map: &mut M, prefix: &str, group: Option<&T>) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize,
{
    let Some(group) = group else {
        return Ok(());
    };
    let Value::Object(fields) = serde_json::to_value(group).map_err(M::Error::custom)? else {
        return Err(M::Error::custom(format!("{prefix} group is not a JSON object")));
    };
    for (key, value) in fields {
        map.serialize_entry(&format!("{prefix}_{key}"), &value)?;
    }
    Ok(())
}
