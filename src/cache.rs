//! Capacity-bounded cache whose entries expire after a fixed time-to-live.
//!
//! Time comes from an injected [`Clock`], so expiry can be driven
//! deterministically in tests. The cache is an ordinary value: build one and
//! hand it to whatever needs it.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use log::{debug, trace};
use lru::LruCache;
use parking_lot::Mutex;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
    expirations: AtomicUsize,
}

pub struct TtlCache<K: Hash + Eq, V, C: Clock = SystemClock> {
    entries: Mutex<LruCache<K, (V, Instant)>>,
    ttl: Duration,
    clock: C,
    stats: CacheStats,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V, SystemClock> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, SystemClock)
    }
}

impl<K: Hash + Eq, V: Clone, C: Clock> TtlCache<K, V, C> {
    /// A zero capacity is bumped to one.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Self {
        debug!("Initializing TTL cache with capacity={}, ttl={:?}", capacity, ttl);
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            clock,
            stats: CacheStats::default(),
        }
    }

    /// Looks up a fresh entry. Any borrowed form of the key works, so a
    /// `String`-keyed cache is probed with `&str`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let fresh = match entries.get(key) {
            Some((value, stored_at)) if now.duration_since(*stored_at) < self.ttl => Some(value.clone()),
            Some(_) => None,
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match fresh {
            Some(value) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                entries.pop(key);
                self.stats.expirations.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        self.entries.lock().put(key, (value, now));
    }

    /// Returns the cached value, computing and storing it on a miss.
    /// `compute` runs without the lock held.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&self, key: K, compute: F) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize
    where
        K: Clone,
    {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let expired: Vec<K> = entries.iter()
            .filter(|(_, (_, stored_at))| now.duration_since(*stored_at) >= self.ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        if !expired.is_empty() {
            self.stats.expirations.fetch_add(expired.len(), Ordering::Relaxed);
            trace!("TTL cache: purged {} expired entries", expired.len());
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn hits(&self) -> usize {
        self.stats.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.stats.misses.load(Ordering::Relaxed)
    }

    pub fn expirations(&self) -> usize {
        self.stats.expirations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache_with_clock(capacity: usize, ttl_secs: u64) -> (TtlCache<String, usize, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(capacity, Duration::from_secs(ttl_secs), Arc::clone(&clock));
        (cache, clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_clock(4, 60);
        cache.insert("surahs".to_string(), 114);
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"surahs".to_string()), Some(114));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_expires_after_ttl() {
        let (cache, clock) = cache_with_clock(4, 60);
        cache.insert("surahs".to_string(), 114);
        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get(&"surahs".to_string()), None);
        assert_eq!(cache.expirations(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let (cache, _clock) = cache_with_clock(2, 60);
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        cache.insert("c".to_string(), 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"b".to_string()), None);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let (cache, clock) = cache_with_clock(4, 10);
        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_insert_with("k".to_string(), || { calls += 1; 7 });
        }
        assert_eq!(calls, 1);
        clock.advance(Duration::from_secs(10));
        assert_eq!(cache.get_or_insert_with("k".to_string(), || { calls += 1; 8 }), 8);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = cache_with_clock(8, 30);
        cache.insert("old".to_string(), 1);
        clock.advance(Duration::from_secs(20));
        cache.insert("new".to_string(), 2);
        clock.advance(Duration::from_secs(15));
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"new".to_string()), Some(2));
    }

    #[test]
    fn test_borrowed_lookup() {
        let (cache, _clock) = cache_with_clock(4, 60);
        cache.insert("الفاتحة".to_string(), 7);
        assert_eq!(cache.get("الفاتحة"), Some(7));
        assert_eq!(cache.get("البقرة"), None);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let cache: TtlCache<u32, u32> = TtlCache::new(0, Duration::from_secs(1));
        cache.insert(1, 1);
        assert_eq!(cache.len(), 1);
    }
}
