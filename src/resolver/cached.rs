//! Memoizing wrapper around any [`UrlResolver`].

use dashmap::DashMap;
use url::Url;

use super::{UrlKind, UrlResolver};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct CachedUrl {
    kind: UrlKind,
    url: Url,
}

/// Caches successful resolutions keyed by `(kind, name)`.
///
/// Entries are inserted only if absent and never overwritten. Failures are
/// not cached, so the next call for the same key asks the delegate again.
pub struct CachedResolver<R> {
    delegate: R,
    cache: DashMap<(UrlKind, String), CachedUrl>,
}

impl<R: UrlResolver> CachedResolver<R> {
    /// Wraps `delegate` with an empty cache.
    pub fn new(delegate: R) -> Self {
        Self { delegate, cache: DashMap::new() }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn checked(kind: UrlKind, name: &str, entry: &CachedUrl) -> Result<Url> {
        if entry.kind != kind {
            return Err(Error::CacheInconsistent {
                expected: kind,
                found: entry.kind,
                name: name.to_string(),
            });
        }
        Ok(entry.url.clone())
    }
}

impl<R: UrlResolver> UrlResolver for CachedResolver<R> {
    fn resolve(&self, kind: UrlKind, name: &str) -> Result<Url> {
        let key = (kind, name.to_string());
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(%kind, name, "resolver cache hit");
            return Self::checked(kind, name, &hit);
        }

        let url = self.delegate.resolve(kind, name).map_err(|err| match err {
            Error::Resolution { .. } => err,
            other => Error::Resolution { kind, name: name.to_string(), reason: other.to_string() },
        })?;

        // A concurrent caller may have won the race; keep its value.
        let stored = self.cache.entry(key).or_insert(CachedUrl { kind, url });
        Self::checked(kind, name, &stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Counts delegate calls and fails while `failures` is positive.
    struct CountingResolver {
        calls: AtomicUsize,
        failures: Mutex<usize>,
    }

    impl CountingResolver {
        fn new(failures: usize) -> Self {
            Self { calls: AtomicUsize::new(0), failures: Mutex::new(failures) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl UrlResolver for &CountingResolver {
        fn resolve(&self, kind: UrlKind, name: &str) -> Result<Url> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(Error::transport(format!("https://{name}"), "connection reset"));
            }
            let suffix = match kind {
                UrlKind::SourceRepo => "git",
                UrlKind::CanonicalHost => "web",
            };
            Ok(Url::parse(&format!("https://{name}/{suffix}")).unwrap())
        }
    }

    #[test]
    fn delegate_called_once_per_key() {
        let delegate = CountingResolver::new(0);
        let resolver = CachedResolver::new(&delegate);

        let first = resolver.resolve(UrlKind::SourceRepo, "example.com/a").unwrap();
        for _ in 0..5 {
            let again = resolver.resolve(UrlKind::SourceRepo, "example.com/a").unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(delegate.calls(), 1);
    }

    #[test]
    fn kinds_are_cached_separately() {
        let delegate = CountingResolver::new(0);
        let resolver = CachedResolver::new(&delegate);

        let git = resolver.resolve(UrlKind::SourceRepo, "example.com/a").unwrap();
        let web = resolver.resolve(UrlKind::CanonicalHost, "example.com/a").unwrap();

        assert_ne!(git, web);
        assert_eq!(delegate.calls(), 2);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let delegate = CountingResolver::new(1);
        let resolver = CachedResolver::new(&delegate);

        let err = resolver.resolve(UrlKind::SourceRepo, "example.com/a").unwrap_err();
        assert!(matches!(err, Error::Resolution { kind: UrlKind::SourceRepo, .. }));
        assert!(resolver.is_empty());

        assert!(resolver.resolve(UrlKind::SourceRepo, "example.com/a").is_ok());
        assert_eq!(delegate.calls(), 2);
    }

    #[test]
    fn concurrent_callers_see_one_value() {
        let delegate = CountingResolver::new(0);
        let resolver = CachedResolver::new(&delegate);

        let urls: Vec<Url> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| resolver.resolve(UrlKind::SourceRepo, "example.com/a").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(urls.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn mismatched_entry_kind_is_an_internal_error() {
        let entry = CachedUrl {
            kind: UrlKind::CanonicalHost,
            url: Url::parse("https://github.com/a/b").unwrap(),
        };
        let err = CachedResolver::<&CountingResolver>::checked(UrlKind::SourceRepo, "a", &entry)
            .unwrap_err();
        assert!(matches!(err, Error::CacheInconsistent { .. }));
    }
}
