//! Go Report Card grades, scraped from the report page.

use serde::{Deserialize, Serialize};

use super::fetch_text;
use crate::error::{Error, Result};
use crate::ports::HttpClient;

const RESPONSE_START: &str = "var response =  \"";
const RESPONSE_END: &str = "\" ;\n";

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    average: f64,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    files: u64,
    #[serde(default)]
    issues: u64,
}

#[derive(Debug, Deserialize)]
struct Redirect {
    redirect: String,
}

/// `goreportcard_` output group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoReportCardStats {
    /// Average check score, rounded to two decimals.
    pub average: f64,
    /// Letter grade (`A+` to `F`).
    pub grade: String,
    /// Files checked.
    pub files: u64,
    /// Issues found.
    pub issues: u64,
}

/// Reads reports from a Go Report Card instance.
pub struct GoReportCardClient<'a> {
    http: &'a dyn HttpClient,
    base_url: &'a str,
}

impl<'a> GoReportCardClient<'a> {
    /// `base_url` is a host such as `goreportcard.com`.
    pub fn new(http: &'a dyn HttpClient, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Report for a module.
    ///
    /// # Errors
    ///
    /// Transport failures or a page without an embedded report.
    pub fn report(&self, module: &str) -> Result<GoReportCardStats> {
        let path = self.redirect_path(module).unwrap_or_else(|| format!("/report/{module}"));
        let html = fetch_text(self.http, &format!("https://{}{path}", self.base_url), &[])?;
        let report = extract_report(&html)?;

        Ok(GoReportCardStats {
            average: (report.average * 100.0).round() / 100.0,
            grade: report.grade,
            files: report.files,
            issues: report.issues,
        })
    }

    /// The checks endpoint may point at a canonical report path.
    fn redirect_path(&self, module: &str) -> Option<String> {
        let url = format!("https://{}/checks?repo={module}", self.base_url);
        let resp = self.http.get(&url, &[]).ok()?;
        let redirect: Redirect = serde_json::from_str(&resp.body).ok()?;
        tracing::debug!(module, path = %redirect.redirect, "goreportcard redirect");
        Some(redirect.redirect)
    }
}

/// Pulls the JSON string literal assigned to `response` out of the page.
fn extract_report(html: &str) -> Result<Report> {
    let what = "goreportcard page";
    let start = html
        .find(RESPONSE_START)
        .ok_or_else(|| Error::parse(what, "not found response object in html"))?
        + RESPONSE_START.len();
    let len = html[start..]
        .find(RESPONSE_END)
        .ok_or_else(|| Error::parse(what, "not found response end object in html"))?;
    let escaped = &html[start..start + len];

    let unescaped: String = serde_json::from_str(&format!("\"{escaped}\""))
        .map_err(|e| Error::parse(what, format!("can not unescape: {e}")))?;
    serde_json::from_str(&unescaped).map_err(|e| Error::parse(what, format!("can not unmarshal: {e}")))
}
