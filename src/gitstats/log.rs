//! Parses `git log --pretty=format:'%at %ae'` output and reduces it to a
//! recency and contributor summary.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

const DAYS_PER_MONTH: f64 = 28.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// One commit: author timestamp and author email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLogEntry {
    /// Author date.
    pub author_date: DateTime<Utc>,
    /// Author email, the contributor identity.
    pub author_email: String,
}

impl GitLogEntry {
    /// Parses a single `<unix-seconds> <email>` line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the line does not have exactly two
    /// fields or the timestamp is not an integer.
    pub fn from_line(line: &str) -> Result<Self> {
        let vals: Vec<&str> = line.split_whitespace().collect();
        let [ts, email] = vals.as_slice() else {
            return Err(Error::parse("git log line", format!("wrong number of fields in {line:?}")));
        };
        let secs: i64 = ts
            .parse()
            .map_err(|e| Error::parse("git log line", format!("bad UNIX timestamp {ts:?}: {e}")))?;
        let author_date = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| Error::parse("git log line", format!("timestamp {secs} out of range")))?;
        Ok(Self { author_date, author_email: (*email).to_string() })
    }
}

/// Parses a whole log, newest commit first. Blank lines are skipped.
///
/// # Errors
///
/// Returns the first malformed line as [`Error::Parse`].
pub fn parse_log(raw: &str) -> Result<Vec<GitLogEntry>> {
    raw.lines().filter(|l| !l.trim().is_empty()).map(GitLogEntry::from_line).collect()
}

/// Recency and contributor counts for one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct GitSummary {
    /// Author date of the newest commit.
    pub last_commit: DateTime<Utc>,
    /// Fractional days between the newest commit and `now`.
    pub days_since_last_commit: f64,
    /// `days / 28`.
    pub months_since_last_commit: f64,
    /// `days / 28 / 12`.
    pub years_since_last_commit: f64,
    /// Distinct author emails.
    pub contributor_count: usize,
}

/// Reduces `entries` (newest first) relative to `now`.
///
/// # Errors
///
/// An empty log is [`Error::DataAbsent`]: there is no meaningful zero.
pub fn summarize(entries: &[GitLogEntry], now: DateTime<Utc>) -> Result<GitSummary> {
    let newest = entries.first().ok_or_else(|| Error::DataAbsent("git log is empty".into()))?;

    #[allow(clippy::cast_precision_loss)]
    let days = (now - newest.author_date).num_seconds() as f64 / 86_400.0;
    let contributors: HashSet<&str> = entries.iter().map(|e| e.author_email.as_str()).collect();

    Ok(GitSummary {
        last_commit: newest.author_date,
        days_since_last_commit: days,
        months_since_last_commit: days / DAYS_PER_MONTH,
        years_since_last_commit: days / DAYS_PER_MONTH / MONTHS_PER_YEAR,
        contributor_count: contributors.len(),
    })
}
