//! Cache manager for holding API responses in memory
//!
//! Provides a `CacheManager` that stores values under string keys with a
//! sliding expiration: every successful read pushes the expiry forward.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Entry stored in the cache map
#[derive(Debug)]
struct CacheEntry<V> {
    /// The cached data
    data: V,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// Last successful read or write
    last_access: DateTime<Utc>,
    /// Idle time after which the entry expires
    sliding: Duration,
}

impl<V> CacheEntry<V> {
    /// Saturates at the latest representable instant for huge windows
    fn expires_at(&self) -> DateTime<Utc> {
        self.last_access
            .checked_add_signed(self.sliding)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Result of reading from cache
#[derive(Debug, Clone)]
pub struct CachedData<V> {
    /// The cached data
    pub data: V,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Expiry after this read refreshed the entry
    pub expires_at: DateTime<Utc>,
}

/// Keyed in-memory store with sliding expiration
///
/// Clones share the same underlying map, so one manager can be handed to
/// several clients. Expired entries are evicted lazily when read.
#[derive(Debug)]
pub struct CacheManager<V> {
    entries: Arc<Mutex<HashMap<String, CacheEntry<V>>>>,
}

impl<V> Clone for CacheManager<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for CacheManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheManager<V> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // A panic while holding the lock cannot leave an entry half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Writes data to the cache, replacing any existing entry
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "orders")
    /// * `data` - The data to cache
    /// * `sliding` - Idle time after which the entry expires
    pub fn write(&self, key: &str, data: V, sliding: Duration) {
        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            last_access: now,
            sliding,
        };

        self.lock().insert(key.to_string(), entry);
    }

    /// Removes an entry, returning whether one was present
    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<V: Clone> CacheManager<V> {
    /// Reads data from the cache
    ///
    /// A fresh entry has its expiry pushed forward and a clone of its data
    /// returned. An expired entry is evicted.
    ///
    /// # Returns
    /// * `Some(CachedData<V>)` if the entry exists and has not expired
    /// * `None` if the entry is missing or expired
    pub fn read(&self, key: &str) -> Option<CachedData<V>> {
        let mut entries = self.lock();
        let now = Utc::now();

        if now > entries.get(key)?.expires_at() {
            entries.remove(key);
            return None;
        }

        let entry = entries.get_mut(key)?;
        entry.last_access = now;
        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            expires_at: entry.expires_at(),
        })
    }
}
