//! FxStrength Engine
//!
//! Generates currency pair strengths, aggregates them per currency and
//! caches the result for a freshness window.
//!
//! # Features
//!
//! - Pluggable strength sources with a seedable random implementation
//! - Per-currency score, count and average aggregation
//! - Single-entry snapshot cache with an injected clock
//! - Single-writer regeneration for concurrent stale readers
//!
//! # Example
//!
//! ```rust,ignore
//! use fxstrength_engine::{StrengthEngine, StrengthEngineConfig};
//!
//! let engine = StrengthEngine::random(StrengthEngineConfig::default());
//! let snapshot = engine.get_strength_data().await?;
//! println!("{:?}", snapshot.currency_aggregates.averages);
//! ```

pub mod aggregate;
pub mod cache;
pub mod engine;
pub mod snapshot;
pub mod source;

pub use aggregate::aggregate;
pub use cache::{CacheStats, SnapshotCache, SnapshotCacheConfig};
pub use engine::{StrengthEngine, StrengthEngineConfig};
pub use snapshot::{CurrencyAggregates, PairStrengths, Snapshot};
pub use source::{RandomStrengthSource, StrengthSource};

#[cfg(any(test, feature = "test-utils"))]
pub use source::MockStrengthSource;
