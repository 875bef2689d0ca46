//! Archive cache.
//!
//! Process-local cache for the vocabulary archive with `get`/`put`/`clear`
//! semantics. Last write wins; entries are guarded by a version key so a
//! vocabulary release change invalidates everything at once.

use std::collections::HashMap;

/// Storage interface injected into the fetcher.
pub trait ArchiveCache: Send {
    /// Fetch cached bytes for a key, if present under the current version.
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    /// Store bytes for a key. Last write wins.
    fn put(&mut self, key: &str, bytes: Vec<u8>);
    /// Drop every entry.
    fn clear(&mut self);
}

/// In-memory cache implementation.
#[derive(Debug, Default)]
pub struct MemoryCache {
    version: String,
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryCache {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: HashMap::new(),
        }
    }

    /// Switch to a new version key, clearing stale entries on change.
    pub fn ensure_version(&mut self, version: &str) {
        if self.version != version {
            log::debug!(
                "Archive cache version changed ({} -> {version}), clearing",
                self.version
            );
            self.entries.clear();
            self.version = version.to_string();
        }
    }
}

impl ArchiveCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, bytes: Vec<u8>) {
        self.entries.insert(key.to_string(), bytes);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A cache that stores nothing. Used when caching is disabled.
#[derive(Debug, Default)]
pub struct NoCache;

impl ArchiveCache for NoCache {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&mut self, _key: &str, _bytes: Vec<u8>) {}

    fn clear(&mut self) {}
}
