//! In-memory TTL cache shared by the data catalogs.
//!
//! Entries carry an absolute expiry. Nothing sweeps in the background:
//! expired entries are removed when `get` or `has` touches them.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::port::outbound::clock::{Clock, SystemClock};

/// Default time-to-live, in seconds (10 minutes).
pub const DEFAULT_TTL_SECS: i64 = 600;

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    timestamp: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Key/value cache with a single global TTL.
pub struct DataCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache")
            .field("entries", &self.entries.lock().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl DataCache {
    /// Create a cache on the system clock.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `data` under `key`, replacing any previous entry.
    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, data: T) {
        let now = self.clock.now();
        let key = key.into();
        debug!(key = %key, "Cache set");
        self.entries.lock().insert(
            key,
            CacheEntry {
                data: Arc::new(data),
                timestamp: now,
                expires_at: now
                    .checked_add_signed(self.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
    }

    /// Fetch a live entry. Returns `None` when the key is missing, expired
    /// (the entry is dropped) or holds a different type.
    #[must_use]
    pub fn get<T: Any + Clone>(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if now > entry.expires_at {
            entries.remove(key);
            debug!(key, "Cache expired");
            return None;
        }

        let value = entry.data.downcast_ref::<T>().cloned();
        debug!(
            key,
            hit = value.is_some(),
            age_secs = (now - entry.timestamp).num_seconds(),
            "Cache get"
        );
        value
    }

    /// Whether a live entry exists, dropping it if expired.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if now > entry.expires_at => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
        debug!("Cache cleared");
    }

    /// Number of stored entries, including expired ones not yet touched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::clock::ManualClock;

    fn cache() -> (DataCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = DataCache::with_clock(Duration::minutes(10), clock.clone());
        (cache, clock)
    }

    #[test]
    fn get_returns_value_before_expiry() {
        let (cache, clock) = cache();
        cache.set("k", vec![1, 2, 3]);
        clock.advance(Duration::minutes(9));
        assert_eq!(cache.get::<Vec<i32>>("k"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn entry_is_live_exactly_at_expiry() {
        let (cache, clock) = cache();
        cache.set("k", 1u32);
        clock.advance(Duration::minutes(10));
        assert!(cache.has("k"));
    }

    #[test]
    fn expired_entry_is_removed_on_get() {
        let (cache, clock) = cache();
        cache.set("k", "v".to_string());
        clock.advance(Duration::minutes(10) + Duration::milliseconds(1));
        assert_eq!(cache.get::<String>("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn expired_entry_is_removed_on_has() {
        let (cache, clock) = cache();
        cache.set("k", 1u8);
        clock.advance(Duration::minutes(11));
        assert!(!cache.has("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn type_mismatch_reads_as_miss() {
        let (cache, _) = cache();
        cache.set("k", 1u64);
        assert_eq!(cache.get::<String>("k"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn set_replaces_and_resets_expiry() {
        let (cache, clock) = cache();
        cache.set("k", 1u32);
        clock.advance(Duration::minutes(8));
        cache.set("k", 2u32);
        clock.advance(Duration::minutes(8));
        assert_eq!(cache.get::<u32>("k"), Some(2));
    }

    #[test]
    fn oversized_ttl_never_expires() {
        let clock = Arc::new(ManualClock::default());
        let cache = DataCache::with_clock(Duration::MAX, clock.clone());
        cache.set("k", 1u32);
        clock.advance(Duration::days(365 * 100));
        assert_eq!(cache.get::<u32>("k"), Some(1));
    }

    #[test]
    fn clear_empties_everything() {
        let (cache, _) = cache();
        cache.set("a", 1u32);
        cache.set("b", 2u32);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.has("a"));
    }
}
