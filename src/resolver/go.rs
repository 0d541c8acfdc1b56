//! Resolves Go module paths through the `go-get=1` discovery protocol.

use url::Url;

use super::{UrlKind, UrlResolver};
use crate::error::{Error, Result};
use crate::ports::HttpClient;

const GITHUB_PREFIX: &str = "github.com/";

/// Looks up module URLs with the live (or replayed) HTTP port.
pub struct GoModuleUrlResolver<'a> {
    http: &'a dyn HttpClient,
}

impl<'a> GoModuleUrlResolver<'a> {
    /// Creates a resolver over `http`.
    pub fn new(http: &'a dyn HttpClient) -> Self {
        Self { http }
    }

    fn fetch_meta(&self, name: &str) -> Result<String> {
        let url = format!("https://{name}?go-get=1");
        let resp = self.http.get(&url, &[]).map_err(|e| Error::transport(&url, e))?;
        Ok(resp.body)
    }
}

impl UrlResolver for GoModuleUrlResolver<'_> {
    fn resolve(&self, kind: UrlKind, name: &str) -> Result<Url> {
        let fail = |reason: String| Error::Resolution { kind, name: name.to_string(), reason };

        if name.starts_with(GITHUB_PREFIX) {
            return github_repo_url(name).map_err(fail);
        }

        let body = self.fetch_meta(name).map_err(|e| fail(e.to_string()))?;
        let url = parse_go_import(&body).map_err(fail)?;
        if kind == UrlKind::CanonicalHost && url.host_str() != Some("github.com") {
            return Err(fail(format!("git is not on GitHub: {url}")));
        }
        Ok(url)
    }
}

/// Keeps `github.com/<owner>/<repo>` and drops any sub-package path.
fn github_repo_url(name: &str) -> Result<Url, String> {
    let parts: Vec<&str> = name.split('/').collect();
    if parts.len() < 3 || parts[1].is_empty() || parts[2].is_empty() {
        return Err(format!("{name} does not name a GitHub repository"));
    }
    Url::parse(&format!("https://{}", parts[..3].join("/"))).map_err(|e| e.to_string())
}

/// Extracts the repository URL from a `go-import` meta tag.
///
/// The tag content is `<import-prefix> <vcs> <repo-url>`; only `git` is
/// accepted.
pub(crate) fn parse_go_import(body: &str) -> Result<Url, String> {
    let start = body.find("go-import").ok_or("can not find go-import metadata")?;
    let rest = &body[start..];
    let content_at = rest.find("content").ok_or("can not find content after go-import")?;
    let after = rest[content_at + "content".len()..].trim_start();
    let after = after.strip_prefix('=').map(str::trim_start).unwrap_or(after);
    let quote = after.chars().next().filter(|c| *c == '"' || *c == '\'');
    let value = match quote {
        Some(q) => {
            let inner = &after[1..];
            &inner[..inner.find(q).unwrap_or(inner.len())]
        }
        None => "",
    };

    let vals: Vec<&str> = value.split_whitespace().collect();
    if vals.len() != 3 {
        return Err(format!("unexpected num of vals in string: {value}"));
    }
    if vals[1] != "git" {
        return Err(format!("not git repo, vcs is: {}", vals[1]));
    }
    Url::parse(vals[2]).map_err(|e| format!("invalid repository URL {}: {e}", vals[2]))
}
