//! Codecov repository totals.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{fetch_text, owner_repo};
use crate::error::{Error, Result};
use crate::ports::HttpClient;

#[derive(Debug, Deserialize)]
struct RepoResponse {
    latest_commit: Option<CommitStats>,
}

#[derive(Debug, Deserialize)]
struct CommitStats {
    report: Report,
}

#[derive(Debug, Deserialize)]
struct Report {
    totals: Totals,
}

#[derive(Debug, Deserialize)]
struct Totals {
    #[serde(default)]
    files: u64,
    #[serde(default)]
    lines: u64,
    #[serde(default)]
    coverage: f64,
}

/// `codecov_` output group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodecovStats {
    /// Public report page.
    pub url: String,
    /// Files in the latest report.
    pub files: u64,
    /// Lines in the latest report.
    pub lines: u64,
    /// Coverage percentage of the latest report.
    pub coverage: f64,
}

/// Reads the unofficial repository endpoint of a Codecov instance.
pub struct CodecovClient<'a> {
    http: &'a dyn HttpClient,
    base_url: &'a str,
}

impl<'a> CodecovClient<'a> {
    /// `base_url` is a host such as `api.codecov.io`.
    pub fn new(http: &'a dyn HttpClient, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Totals of the latest commit for the repository at `github_url`.
    ///
    /// # Errors
    ///
    /// Transport and parse failures, or [`Error::DataAbsent`] when the
    /// repository is registered but has no commits yet.
    pub fn repo_stats(&self, github_url: &Url) -> Result<CodecovStats> {
        let (owner, repo) = owner_repo(github_url)?;
        let url = format!("https://{}/internal/github/{owner}/repos/{repo}/", self.base_url);
        let body = fetch_text(self.http, &url, &[])?;
        let resp: RepoResponse =
            serde_json::from_str(&body).map_err(|e| Error::parse("codecov response", e))?;
        let commit = resp.latest_commit.ok_or_else(|| {
            Error::DataAbsent(format!("codecov has no commits for {owner}/{repo}"))
        })?;
        let totals = commit.report.totals;

        Ok(CodecovStats {
            url: format!("https://app.codecov.io/gh/{owner}/{repo}"),
            files: totals.files,
            lines: totals.lines,
            coverage: totals.coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::StubHttp;

    const ENDPOINT: &str = "https://api.codecov.io/internal/github/spf13/repos/cobra/";

    fn github_url() -> Url {
        Url::parse("https://github.com/spf13/cobra").unwrap()
    }

    #[test]
    fn reads_latest_commit_totals() {
        let body = r#"{"name":"cobra","latest_commit":{"report":{"totals":{"files":30,"lines":4200,"coverage":84.5}}}}"#;
        let http = StubHttp::default().with(ENDPOINT, 200, body);

        let stats = CodecovClient::new(&http, "api.codecov.io").repo_stats(&github_url()).unwrap();
        assert_eq!(
            stats,
            CodecovStats {
                url: "https://app.codecov.io/gh/spf13/cobra".into(),
                files: 30,
                lines: 4200,
                coverage: 84.5,
            }
        );
    }

    #[test]
    fn missing_latest_commit_is_data_absent() {
        let http = StubHttp::default().with(ENDPOINT, 200, r#"{"name":"cobra","latest_commit":null}"#);
        let err = CodecovClient::new(&http, "api.codecov.io").repo_stats(&github_url()).unwrap_err();
        assert!(matches!(err, Error::DataAbsent(_)));
    }

    #[test]
    fn garbage_body_is_parse_error() {
        let http = StubHttp::default().with(ENDPOINT, 200, "<html>");
        let err = CodecovClient::new(&http, "api.codecov.io").repo_stats(&github_url()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
