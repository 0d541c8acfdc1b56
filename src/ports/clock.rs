//! Clock port used to age commit timestamps.

use chrono::{DateTime, Utc};

/// Source of "now" for recency calculations.
///
/// Git summaries report days since the last commit, so tests pin this to a
/// fixed instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
