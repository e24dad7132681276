//! Content-addressed parse cache.
//!
//! Re-parsing an uploaded file on every filter change is the expensive
//! part of a dashboard session, and the inputs only ever change when the
//! user uploads a different file. The cache key is therefore the exact
//! content (SHA-256) plus the filename (which drives format detection);
//! a different key simply recomputes. No eviction: the map is bounded by
//! the session lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::IngestError;

/// Cache key: content digest plus the filename the bytes arrived under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    digest: [u8; 32],
    filename: String,
}

impl SourceKey {
    /// Builds the key for an uploaded file.
    #[must_use]
    pub fn new(bytes: &[u8], filename: &str) -> Self {
        let digest = Sha256::digest(bytes).into();
        Self {
            digest,
            filename: filename.to_string(),
        }
    }
}

/// Cache of parsed tables keyed by [`SourceKey`].
///
/// Values are wrapped in `Arc` so repeated lookups hand out cheap clones
/// of the same parsed table.
#[derive(Debug)]
pub struct ParseCache<T> {
    cache: HashMap<SourceKey, Arc<T>>,
}

impl<T> Default for ParseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ParseCache<T> {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Checks whether a source is already cached.
    #[must_use]
    pub fn contains(&self, key: &SourceKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Gets the cached table for a source, if present.
    #[must_use]
    pub fn get(&self, key: &SourceKey) -> Option<Arc<T>> {
        self.cache.get(key).cloned()
    }

    /// Gets the parsed table for the given content, parsing at most once.
    ///
    /// A parse failure is returned as-is and nothing is cached, so a
    /// corrected re-upload of the same filename parses fresh.
    ///
    /// # Errors
    /// Whatever `parse` returns.
    pub fn get_or_parse<F>(
        &mut self,
        bytes: &[u8],
        filename: &str,
        parse: F,
    ) -> Result<Arc<T>, IngestError>
    where
        F: FnOnce(&[u8], &str) -> Result<T, IngestError>,
    {
        let key = SourceKey::new(bytes, filename);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("parse cache hit for {filename}");
            return Ok(Arc::clone(cached));
        }

        tracing::debug!("parse cache miss for {filename}");
        let parsed = Arc::new(parse(bytes, filename)?);
        self.cache.insert(key, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Number of cached sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    #[test]
    fn test_same_content_same_key() {
        let a = SourceKey::new(b"abc", "sales.csv");
        let b = SourceKey::new(b"abc", "sales.csv");
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_depends_on_content_and_filename() {
        let base = SourceKey::new(b"abc", "sales.csv");
        assert_ne!(base, SourceKey::new(b"abd", "sales.csv"));
        assert_ne!(base, SourceKey::new(b"abc", "stock.csv"));
    }

    #[test]
    fn test_get_or_parse_parses_once() {
        let calls = StdCell::new(0usize);
        let mut cache: ParseCache<usize> = ParseCache::new();

        for _ in 0..3 {
            let value = cache
                .get_or_parse(b"abc", "sales.csv", |bytes, _| {
                    calls.set(calls.get() + 1);
                    Ok(bytes.len())
                })
                .unwrap();
            assert_eq!(*value, 3);
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_parse_failure_is_not_cached() {
        let mut cache: ParseCache<usize> = ParseCache::new();

        let err = cache
            .get_or_parse(b"abc", "sales.csv", |_, _| Err(IngestError::Empty))
            .unwrap_err();
        assert!(matches!(err, IngestError::Empty));
        assert!(cache.is_empty());

        // same bytes parse fine afterwards
        let value = cache
            .get_or_parse(b"abc", "sales.csv", |bytes, _| Ok(bytes.len()))
            .unwrap();
        assert_eq!(*value, 3);
    }
}
