//! Snapshot caching with a freshness window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Duration;
use fxstrength_common::{constants, Clock, Timestamp};
use parking_lot::RwLock;
use tracing::debug;

use crate::snapshot::Snapshot;

/// Cached snapshot entry.
#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Arc<Snapshot>,
    cached_at: Timestamp,
}

impl CacheEntry {
    fn is_fresh(&self, now: Timestamp, window: Duration) -> bool {
        now.signed_duration_since(self.cached_at) <= window
    }
}

/// Configuration for the snapshot cache.
#[derive(Debug, Clone)]
pub struct SnapshotCacheConfig {
    /// How long a snapshot is served before it is regenerated.
    pub freshness_window: Duration,
}

impl Default for SnapshotCacheConfig {
    fn default() -> Self {
        Self {
            freshness_window: constants::freshness_window(),
        }
    }
}

/// Thread-safe single-entry snapshot cache.
///
/// Entries are replaced wholesale; a published snapshot is never mutated.
pub struct SnapshotCache {
    entry: RwLock<Option<CacheEntry>>,
    clock: Arc<dyn Clock>,
    config: SnapshotCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

impl SnapshotCache {
    /// Create a cache with the default freshness window.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(clock, SnapshotCacheConfig::default())
    }

    /// Create a cache with custom configuration.
    pub fn with_config(clock: Arc<dyn Clock>, config: SnapshotCacheConfig) -> Self {
        Self {
            entry: RwLock::new(None),
            clock,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    /// Get the cached snapshot if it is still fresh.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        match self.lookup() {
            Some(snapshot) => {
                debug!(timestamp = %snapshot.timestamp, "Cache hit");
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(snapshot)
            }
            None => {
                debug!("Cache miss");
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Fresh lookup without touching statistics.
    pub(crate) fn lookup(&self) -> Option<Arc<Snapshot>> {
        let now = self.clock.now();
        self.entry
            .read()
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.config.freshness_window))
            .map(|entry| entry.snapshot.clone())
    }

    /// Publish a snapshot, replacing any previous one.
    ///
    /// Freshness is measured from the snapshot's own timestamp.
    pub fn store(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let entry = CacheEntry {
            snapshot: snapshot.clone(),
            cached_at: snapshot.timestamp,
        };

        *self.entry.write() = Some(entry);
        self.stores.fetch_add(1, Ordering::Relaxed);
        snapshot
    }

    /// Drop the cached snapshot.
    pub fn clear(&self) {
        *self.entry.write() = None;
    }

    /// Get the configured freshness window.
    pub fn freshness_window(&self) -> Duration {
        self.config.freshness_window
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            last_update: self.entry.read().as_ref().map(|e| e.cached_at),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub last_update: Option<Timestamp>,
}
