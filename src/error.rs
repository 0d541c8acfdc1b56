//! Error kinds shared by every collector, plus the aggregate that carries them.

use std::fmt;

use thiserror::Error;

use crate::resolver::UrlKind;

/// Errors produced while enriching or rendering a graph.
#[derive(Error, Debug)]
pub enum Error {
    /// A module name could not be mapped to a URL.
    #[error("can not resolve {kind} for {name}: {reason}")]
    Resolution {
        /// Which URL was requested.
        kind: UrlKind,
        /// Module name being resolved.
        name: String,
        /// Underlying delegate failure.
        reason: String,
    },

    /// A network request failed before a usable response arrived.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Failure description.
        message: String,
    },

    /// An external tool could not be run or exited unsuccessfully.
    #[error("{command} failed: {message}")]
    Process {
        /// Command line that was executed.
        command: String,
        /// Failure description.
        message: String,
    },

    /// A response or log line did not match the expected shape.
    #[error("can not parse {what}: {message}")]
    Parse {
        /// What was being parsed.
        what: String,
        /// Failure description.
        message: String,
    },

    /// A payload was present but carried no usable data.
    #[error("{0}")]
    DataAbsent(String),

    /// The resolver cache returned an entry for a different URL kind.
    #[error("resolver cache holds a {found} entry under the {expected} key for {name}")]
    CacheInconsistent {
        /// Kind requested by the caller.
        expected: UrlKind,
        /// Kind stored in the cache.
        found: UrlKind,
        /// Module name.
        name: String,
    },

    /// Invalid or unreadable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An error tagged with the module or source it came from.
    #[error("{context}: {source}")]
    Context {
        /// Module identity or source name.
        context: String,
        /// The tagged error.
        #[source]
        source: Box<Error>,
    },

    /// I/O failure on a stream or local copy.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps this error with a context label.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context { context: context.into(), source: Box::new(self) }
    }

    /// Shorthand for a [`Error::Parse`] value.
    pub fn parse(what: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse { what: what.into(), message: message.to_string() }
    }

    /// Shorthand for a [`Error::Transport`] value.
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport { url: url.into(), message: message.to_string() }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Ordered collection of errors that never drops a member.
///
/// Collectors push every source failure here and keep going, so a caller
/// always receives the best-effort value next to the full list of failures.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<Error>,
}

impl AggregateError {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one error.
    pub fn push(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Appends every error of `other`, keeping order.
    pub fn append(&mut self, other: AggregateError) {
        self.errors.extend(other.errors);
    }

    /// Appends every error of `other`, tagging each with `context`.
    pub fn append_with_context(&mut self, context: &str, other: AggregateError) {
        self.errors.extend(other.errors.into_iter().map(|e| e.context(context)));
    }

    /// Returns `true` when nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the collected errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

impl From<Error> for AggregateError {
    fn from(err: Error) -> Self {
        Self { errors: vec![err] }
    }
}

impl IntoIterator for AggregateError {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregate_has_no_errors() {
        let agg = AggregateError::new();
        assert!(agg.is_empty());
        assert_eq!(agg.to_string(), "");
    }

    #[test]
    fn aggregate_keeps_every_error_in_order() {
        let mut agg = AggregateError::new();
        agg.push(Error::DataAbsent("git log is empty".into()));
        agg.push(Error::parse("coverage", "no percentage"));

        assert_eq!(agg.len(), 2);
        assert_eq!(agg.to_string(), "git log is empty; can not parse coverage: no percentage");
    }

    #[test]
    fn append_with_context_tags_each_error() {
        let mut inner = AggregateError::new();
        inner.push(Error::DataAbsent("a".into()));
        inner.push(Error::DataAbsent("b".into()));

        let mut outer = AggregateError::new();
        outer.append_with_context("example.com/mod", inner);

        let rendered: Vec<String> = outer.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["example.com/mod: a", "example.com/mod: b"]);
    }
}
