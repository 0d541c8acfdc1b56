//! Membership in curated "awesome" lists.

use serde::Serialize;
use url::Url;

use super::fetch_text;
use crate::error::Result;
use crate::ports::HttpClient;

/// Raw README of the awesome-go list.
pub const DEFAULT_AWESOME_LIST_URL: &str =
    "https://raw.githubusercontent.com/avelino/awesome-go/master/README.md";

/// `awesomelists_` output group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwesomeListStats {
    /// The list links to the repository.
    pub is_mentioned: bool,
}

/// Checks whether a list document links to a repository.
pub struct AwesomeListChecker<'a> {
    http: &'a dyn HttpClient,
    list_url: &'a str,
}

impl<'a> AwesomeListChecker<'a> {
    /// Checks against the document at `list_url`.
    pub fn new(http: &'a dyn HttpClient, list_url: &'a str) -> Self {
        Self { http, list_url }
    }

    /// Whether the list contains `github_url`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the list cannot be fetched.
    pub fn check(&self, github_url: &Url) -> Result<AwesomeListStats> {
        let list = fetch_text(self.http, self.list_url, &[])?;
        let needle = github_url.as_str().trim_end_matches('/');
        Ok(AwesomeListStats { is_mentioned: list.contains(needle) })
    }
}
