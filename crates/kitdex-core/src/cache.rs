//! In-memory key/value cache with per-entry expiry.
//!
//! [`TtlCache`] expires entries lazily: an expired entry is dropped by the
//! first [`get`](TtlCache::get) that sees it, or in bulk by
//! [`purge_expired`](TtlCache::purge_expired). There is no background sweeper.
//!
//! Readers share a read lock on the fast path. Values are cloned out under the
//! lock, so a `set` racing a `get` on the same key yields either the old or the
//! new value, never a partial one.
//!
//! The fetcher, discoverer and registry builder share a single
//! [`SharedCache`] holding [`Cached`] values, keyed by [`cache_key`] digests,
//! so one [`clear`](TtlCache::clear) invalidates every layer at once.

use crate::types::ComponentRegistry;
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Default lifetime for entries stored without an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Values stored in the service-wide cache.
#[derive(Debug, Clone)]
pub enum Cached {
    /// Body of a raw file fetched with HTTP 200.
    Content(String),
    /// A remembered 404. Only stored when negative caching is enabled.
    Missing,
    /// Identifiers confirmed to exist upstream, in candidate order.
    Identifiers(Vec<String>),
    /// A fully built registry snapshot.
    Registry(Arc<ComponentRegistry>),
}

/// Cache shared by every layer of a component service.
pub type SharedCache = Arc<TtlCache<String, Cached>>;

/// Build a deterministic key from an ordered sequence of arguments.
///
/// Each part is length-prefixed before hashing, so `("ab", "c")` and
/// `("a", "bc")` produce different keys, as does any reordering.
///
/// ```rust
/// use kitdex_core::cache::cache_key;
///
/// assert_eq!(cache_key(["fetch", "a.tsx", "main"]), cache_key(["fetch", "a.tsx", "main"]));
/// assert_ne!(cache_key(["fetch", "a.tsx", "main"]), cache_key(["fetch", "main", "a.tsx"]));
/// ```
pub fn cache_key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        let bytes = part.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    STANDARD.encode(hasher.finalize())
}

#[derive(Debug)]
struct TtlEntry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl<V> TtlEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
    inserts: AtomicUsize,
    evictions: AtomicUsize,
}

/// Point-in-time view of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStatsSummary {
    /// Lookups that returned a live value.
    pub hits: usize,
    /// Lookups that found nothing or an expired value.
    pub misses: usize,
    /// Calls to `set` / `set_with_ttl`.
    pub inserts: usize,
    /// Entries dropped because they expired.
    pub evictions: usize,
    /// Entries currently held, expired or not.
    pub entries: usize,
}

/// Key/value store with per-entry expiry.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, TtlEntry<V>>>,
    default_ttl: Duration,
    stats: CacheStats,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Create an empty cache whose `set` uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            stats: CacheStats::default(),
        }
    }

    /// Lifetime applied by [`set`](Self::set).
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Return a clone of the live value for `key`.
    ///
    /// An expired entry is removed and reported as absent.
    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => {
                    self.stats.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                },
                Some(entry) if !entry.is_expired(Instant::now()) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                },
                Some(_) => {},
            }
        }

        // Expired on the read path; re-check under the write lock since a
        // concurrent `set` may have refreshed it meanwhile.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(Instant::now()) {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            entries.remove(key);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            debug!("evicted expired cache entry");
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store `value` for the default TTL.
    pub async fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Store `value`, expiring `ttl` from now. A zero TTL stores an already-expired entry.
    ///
    /// A TTL too large to add to the current instant never expires.
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .write()
            .await
            .insert(key, TtlEntry { value, expires_at });
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop every entry regardless of expiry, returning how many were held.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Drop every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        self.stats.evictions.fetch_add(removed, Ordering::Relaxed);
        removed
    }

    /// Number of entries held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Current counters.
    pub async fn stats(&self) -> CacheStatsSummary {
        CacheStatsSummary {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            inserts: self.stats.inserts.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            entries: self.len().await,
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cache() -> TtlCache<String, String> {
        TtlCache::new(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = cache();
        cache.set("k".to_string(), "v".to_string()).await;
        assert_eq!(cache.get(&"k".to_string()).await.as_deref(), Some("v"));
        assert_eq!(cache.get(&"other".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = cache();
        cache
            .set_with_ttl("k".to_string(), "v".to_string(), Duration::from_millis(100))
            .await;
        assert_eq!(cache.get(&"k".to_string()).await.as_deref(), Some("v"));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get(&"k".to_string()).await, None);
        // Lazily deleted on the read above
        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_get_does_not_consume_live_entry() {
        let cache = cache();
        cache.set("k".to_string(), "v".to_string()).await;
        for _ in 0..3 {
            assert!(cache.get(&"k".to_string()).await.is_some());
        }
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_set_overwrites_and_refreshes_expiry() {
        let cache = cache();
        cache
            .set_with_ttl("k".to_string(), "old".to_string(), Duration::from_millis(50))
            .await;
        cache.set("k".to_string(), "new".to_string()).await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get(&"k".to_string()).await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_clear_drops_live_entries() {
        let cache = cache();
        cache.set("a".to_string(), "1".to_string()).await;
        cache.set("b".to_string(), "2".to_string()).await;
        assert_eq!(cache.clear().await, 2);
        assert!(cache.is_empty().await);
        assert_eq!(cache.get(&"a".to_string()).await, None);
        assert_eq!(cache.clear().await, 0);
    }

    #[tokio::test]
    async fn test_unrepresentable_ttl_never_expires() {
        let cache: TtlCache<String, String> = TtlCache::new(Duration::MAX);
        cache.set("k".to_string(), "v".to_string()).await;
        cache
            .set_with_ttl("j".to_string(), "w".to_string(), Duration::from_secs(u64::MAX))
            .await;

        assert_eq!(cache.get(&"k".to_string()).await.as_deref(), Some("v"));
        assert_eq!(cache.get(&"j".to_string()).await.as_deref(), Some("w"));
        assert_eq!(cache.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_entries() {
        let cache = cache();
        cache
            .set_with_ttl("short".to_string(), "x".to_string(), Duration::ZERO)
            .await;
        cache.set("long".to_string(), "y".to_string()).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&"long".to_string()).await.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_readers_and_writer() {
        let cache = Arc::new(cache());
        cache.set("k".to_string(), "a".to_string()).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    cache.set("k".to_string(), "b".to_string()).await;
                    None
                } else {
                    cache.get(&"k".to_string()).await
                }
            }));
        }

        for handle in handles {
            if let Some(value) = handle.await.unwrap() {
                assert!(value == "a" || value == "b", "torn value: {value}");
            }
        }
    }

    #[test]
    fn test_cache_key_is_order_sensitive() {
        assert_ne!(cache_key(["a", "b"]), cache_key(["b", "a"]));
        assert_ne!(cache_key(["ab", "c"]), cache_key(["a", "bc"]));
        assert_ne!(cache_key(["registry"]), cache_key(["registry", ""]));
    }

    proptest! {
        #[test]
        fn test_cache_key_deterministic(parts in prop::collection::vec(".{0,16}", 0..6)) {
            prop_assert_eq!(cache_key(&parts), cache_key(&parts));
        }

        #[test]
        fn test_cache_key_value_sensitive(
            parts in prop::collection::vec("[a-z]{1,8}", 1..5),
            extra in "[A-Z]{1,4}",
        ) {
            let mut changed = parts.clone();
            changed[0].push_str(&extra);
            prop_assert_ne!(cache_key(&parts), cache_key(&changed));
        }
    }
}
