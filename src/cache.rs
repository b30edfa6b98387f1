//! Fixed-TTL, size-bounded memoization of decomposed responses.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::trace;

/// Identity of one memoized call: the operation plus every caller-supplied
/// identifying parameter, in order. Absent optional parameters stay `None`
/// so they never collide with an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: &'static str,
    pub params: Vec<Option<String>>,
}

impl CacheKey {
    pub fn new<I, S>(operation: &'static str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CacheKey {
            operation,
            params: params.into_iter().map(|p| Some(p.into())).collect(),
        }
    }

    pub fn with_optional(operation: &'static str, params: Vec<Option<String>>) -> Self {
        CacheKey { operation, params }
    }
}

struct CachedValue<V> {
    value: V,
    stored_at: Instant,
}

pub struct TtlCache<K: Hash + Eq, V> {
    entries: LruCache<K, CachedValue<V>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        TtlCache {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Returns the live entry for `key`, dropping it if its window has passed.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(cached) => now.saturating_duration_since(cached.stored_at) >= self.ttl,
            None => return None,
        };

        if expired {
            trace!("expired cache entry dropped");
            self.entries.pop(key);
            return None;
        }

        self.entries.get(key).map(|cached| cached.value.clone())
    }

    /// Stores `value`; the least recently used entry goes when the table is full.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.put(
            key,
            CachedValue {
                value,
                stored_at: now,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> CacheKey {
        CacheKey::new("summoner", ["EUW", id])
    }

    #[test]
    fn hit_within_ttl() {
        let mut cache = TtlCache::new(4, Duration::from_secs(60));
        let now = Instant::now();

        cache.insert_at(key("a"), 1, now);

        assert_eq!(cache.get_at(&key("a"), now + Duration::from_secs(59)), Some(1));
    }

    #[test]
    fn miss_after_ttl_removes_entry() {
        let mut cache = TtlCache::new(4, Duration::from_secs(60));
        let now = Instant::now();

        cache.insert_at(key("a"), 1, now);

        assert_eq!(cache.get_at(&key("a"), now + Duration::from_secs(60)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn evicts_least_recently_used_on_overflow() {
        let mut cache = TtlCache::new(2, Duration::from_secs(60));
        let now = Instant::now();

        cache.insert_at(key("a"), 1, now);
        cache.insert_at(key("b"), 2, now);
        // touching "a" makes "b" the eviction candidate
        assert_eq!(cache.get_at(&key("a"), now), Some(1));
        cache.insert_at(key("c"), 3, now);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at(&key("b"), now), None);
        assert_eq!(cache.get_at(&key("a"), now), Some(1));
        assert_eq!(cache.get_at(&key("c"), now), Some(3));
    }

    #[test]
    fn keys_differ_by_parameters_and_operation() {
        assert_ne!(key("a"), key("b"));
        assert_ne!(
            CacheKey::new("challenger", ["EUW", "RANKED_SOLO_5x5"]),
            CacheKey::new("master", ["EUW", "RANKED_SOLO_5x5"])
        );
        assert_ne!(
            CacheKey::with_optional("summoner", vec![None, Some(String::new())]),
            CacheKey::with_optional("summoner", vec![Some(String::new()), None])
        );
    }
}
