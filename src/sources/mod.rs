//! Optional per-module stat sources.
//!
//! Remote sources read through [`HttpClient`], local scans through
//! [`FileSystem`]. Each returns its own output group.

pub mod awesomelists;
pub mod codecov;
pub mod files;
pub mod github;
pub mod goreportcard;
pub mod readme;

use url::Url;

use crate::error::{Error, Result};
use crate::ports::HttpClient;

pub use awesomelists::{AwesomeListChecker, AwesomeListStats};
pub use codecov::{CodecovClient, CodecovStats};
pub use files::{scan_files, FileScanStats};
pub use github::{GitHubClient, GitHubStats};
pub use goreportcard::{GoReportCardClient, GoReportCardStats};
pub use readme::{scan_readme, ReadmeStats};

/// GETs `url` and returns the body of a 2xx response.
pub(crate) fn fetch_text(
    http: &dyn HttpClient,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<String> {
    let resp = http.get(url, headers).map_err(|e| Error::transport(url, e))?;
    if !resp.is_success() {
        return Err(Error::transport(url, format!("unexpected status {}", resp.status)));
    }
    Ok(resp.body)
}

/// Splits `https://github.com/<owner>/<repo>` into its two path segments.
pub(crate) fn owner_repo(github_url: &Url) -> Result<(String, String)> {
    let parts: Vec<&str> = github_url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();
    match parts.as_slice() {
        [owner, repo] => Ok(((*owner).to_string(), (*repo).to_string())),
        _ => Err(Error::parse("GitHub URL", format!("expected /<owner>/<repo> in {github_url}"))),
    }
}
