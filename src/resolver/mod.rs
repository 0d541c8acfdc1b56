//! Module name to URL resolution.
//!
//! [`UrlResolver`] is the seam: [`GoModuleUrlResolver`] talks to the network,
//! [`CachedResolver`] memoizes any other resolver.

pub mod cached;
pub mod go;

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

pub use cached::CachedResolver;
pub use go::GoModuleUrlResolver;

/// Which URL a caller wants for a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlKind {
    /// Clonable source repository.
    SourceRepo,
    /// Canonical hosting page (GitHub).
    CanonicalHost,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceRepo => f.write_str("source repository URL"),
            Self::CanonicalHost => f.write_str("canonical host URL"),
        }
    }
}

/// Maps a module name to one of its URLs.
pub trait UrlResolver: Send + Sync {
    /// Resolves `name` to the URL of the requested `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be mapped.
    fn resolve(&self, kind: UrlKind, name: &str) -> Result<Url>;
}
