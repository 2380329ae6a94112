//! Main strength engine implementation.

use std::sync::Arc;

use fxstrength_common::{Clock, StrengthError, StrengthResult, SystemClock, STATIC_PAIRS};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::cache::{CacheStats, SnapshotCache, SnapshotCacheConfig};
use crate::snapshot::{is_valid_strength, PairStrengths, Snapshot};
use crate::source::{RandomStrengthSource, StrengthSource};

/// Configuration for the strength engine.
#[derive(Debug, Clone, Default)]
pub struct StrengthEngineConfig {
    /// Cache configuration.
    pub cache: SnapshotCacheConfig,
}

/// Produces and caches strength snapshots.
pub struct StrengthEngine {
    source: Arc<dyn StrengthSource>,
    clock: Arc<dyn Clock>,
    cache: SnapshotCache,
    refresh: Mutex<()>,
}

impl StrengthEngine {
    /// Create a new engine with the given source and clock.
    pub fn new(
        source: Arc<dyn StrengthSource>,
        clock: Arc<dyn Clock>,
        config: StrengthEngineConfig,
    ) -> Self {
        Self {
            source,
            cache: SnapshotCache::with_config(clock.clone(), config.cache),
            clock,
            refresh: Mutex::new(()),
        }
    }

    /// Create an engine backed by random data and wall-clock time.
    pub fn random(config: StrengthEngineConfig) -> Self {
        Self::new(
            Arc::new(RandomStrengthSource::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    /// Get the current snapshot, regenerating it when stale.
    ///
    /// Concurrent callers that find the cache stale wait for a single
    /// regeneration. A failed regeneration leaves the cache untouched.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn get_strength_data(&self) -> StrengthResult<Arc<Snapshot>> {
        if let Some(snapshot) = self.cache.get() {
            return Ok(snapshot);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.cache.lookup() {
            debug!("Snapshot refreshed by concurrent request");
            return Ok(snapshot);
        }

        let snapshot = self.regenerate().await?;
        Ok(self.cache.store(snapshot))
    }

    async fn regenerate(&self) -> StrengthResult<Snapshot> {
        let now = self.clock.now();

        let strengths = self.source.fetch(&STATIC_PAIRS).await.map_err(|e| {
            warn!(error = %e, "Strength source failed");
            e
        })?;
        validate_strengths(&strengths)?;

        let aggregates = aggregate(&strengths);

        info!(
            timestamp = %now,
            pairs = strengths.len(),
            "Regenerated strength snapshot"
        );

        Ok(Snapshot::new(now, strengths, aggregates))
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop the cached snapshot so the next request regenerates.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

/// Check that a source produced exactly the static pairs with valid values.
fn validate_strengths(strengths: &PairStrengths) -> StrengthResult<()> {
    for pair in &STATIC_PAIRS {
        let code = pair.code();
        let value = strengths
            .get(&code)
            .ok_or_else(|| StrengthError::generation(format!("missing strength for {}", code)))?;

        if !is_valid_strength(*value) {
            return Err(StrengthError::generation(format!(
                "strength {} for {} is outside [3.0, 7.0] or not rounded to one decimal",
                value, code
            )));
        }
    }

    if strengths.len() != STATIC_PAIRS.len() {
        let unexpected = strengths
            .keys()
            .find(|code| !STATIC_PAIRS.iter().any(|p| p.code() == **code))
            .cloned()
            .unwrap_or_default();
        return Err(StrengthError::generation(format!(
            "unexpected pair {}",
            unexpected
        )));
    }

    Ok(())
}
