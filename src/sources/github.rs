//! GitHub repository popularity.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{fetch_text, owner_repo};
use crate::error::{Error, Result};
use crate::ports::HttpClient;

const API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Repository {
    stargazers_count: Option<u64>,
}

/// `github_` output group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GitHubStats {
    /// Stargazer count.
    pub repo_stars: u64,
}

/// Minimal REST client for repository metadata.
pub struct GitHubClient<'a> {
    http: &'a dyn HttpClient,
    token: Option<&'a str>,
}

impl<'a> GitHubClient<'a> {
    /// Requests are authenticated when `token` is set.
    pub fn new(http: &'a dyn HttpClient, token: Option<&'a str>) -> Self {
        Self { http, token }
    }

    /// Stars of the repository at `github_url`.
    ///
    /// # Errors
    ///
    /// Transport and parse failures, or [`Error::DataAbsent`] when the
    /// payload carries no star count.
    pub fn repo_stats(&self, github_url: &Url) -> Result<GitHubStats> {
        let (owner, repo) = owner_repo(github_url)?;
        let url = format!("{API_BASE}/repos/{owner}/{repo}");
        let auth = self.token.map(|t| format!("Bearer {t}"));
        let mut headers = vec![("Accept", "application/vnd.github+json")];
        if let Some(auth) = auth.as_deref() {
            headers.push(("Authorization", auth));
        }

        let body = fetch_text(self.http, &url, &headers)?;
        let repository: Repository =
            serde_json::from_str(&body).map_err(|e| Error::parse("GitHub repository", e))?;
        let repo_stars = repository.stargazers_count.ok_or_else(|| {
            Error::DataAbsent(format!("GitHub returned no star count for {owner}/{repo}"))
        })?;
        Ok(GitHubStats { repo_stars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_support::StubHttp;

    const ENDPOINT: &str = "https://api.github.com/repos/spf13/cobra";

    fn github_url() -> Url {
        Url::parse("https://github.com/spf13/cobra").unwrap()
    }

    #[test]
    fn reads_stars_and_sends_token() {
        let http = StubHttp::default().with(ENDPOINT, 200, r#"{"stargazers_count": 31000}"#);
        let stats = GitHubClient::new(&http, Some("t0k")).repo_stats(&github_url()).unwrap();
        assert_eq!(stats.repo_stars, 31_000);

        let requests = http.requests.lock().unwrap();
        assert!(requests[0].1.contains(&("Authorization".to_string(), "Bearer t0k".to_string())));
    }

    #[test]
    fn anonymous_requests_have_no_authorization() {
        let http = StubHttp::default().with(ENDPOINT, 200, r#"{"stargazers_count": 1}"#);
        GitHubClient::new(&http, None).repo_stats(&github_url()).unwrap();
        let requests = http.requests.lock().unwrap();
        assert!(requests[0].1.iter().all(|(k, _)| k != "Authorization"));
    }

    #[test]
    fn missing_repository_is_transport_error() {
        let http = StubHttp::default();
        let err = GitHubClient::new(&http, None).repo_stats(&github_url()).unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
