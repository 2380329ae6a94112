//! Strength source traits and implementations.

use async_trait::async_trait;
use fxstrength_common::{CurrencyPair, StrengthResult};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::snapshot::{round_dp, PairStrengths, MAX_STRENGTH, MIN_STRENGTH};

/// Trait for pair strength sources.
#[async_trait]
pub trait StrengthSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Produce a strength value for each of the given pairs.
    async fn fetch(&self, pairs: &[CurrencyPair]) -> StrengthResult<PairStrengths>;
}

/// Synthetic source drawing uniform values in [3.0, 7.0] rounded to one decimal.
pub struct RandomStrengthSource {
    rng: Mutex<StdRng>,
}

impl RandomStrengthSource {
    /// Create a source seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a deterministic source from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a source around an existing generator.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomStrengthSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StrengthSource for RandomStrengthSource {
    fn name(&self) -> &str {
        "RANDOM"
    }

    async fn fetch(&self, pairs: &[CurrencyPair]) -> StrengthResult<PairStrengths> {
        let mut rng = self.rng.lock();
        let strengths: PairStrengths = pairs
            .iter()
            .map(|pair| {
                let value = rng.gen_range(MIN_STRENGTH..=MAX_STRENGTH);
                (pair.code(), round_dp(value, 1))
            })
            .collect();

        debug!(pairs = strengths.len(), "Generated random strengths");
        Ok(strengths)
    }
}

/// Mock strength source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockStrengthSource {
    strengths: Mutex<PairStrengths>,
    failure: Mutex<Option<String>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockStrengthSource {
    /// Create a mock returning exactly the given strengths.
    pub fn new(strengths: PairStrengths) -> Self {
        Self {
            strengths: Mutex::new(strengths),
            failure: Mutex::new(None),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock reporting the same value for every static pair.
    pub fn uniform(value: f64) -> Self {
        Self::new(
            fxstrength_common::STATIC_PAIRS
                .iter()
                .map(|p| (p.code(), value))
                .collect(),
        )
    }

    /// Set the value for a pair code.
    pub fn set_strength(&self, code: impl Into<String>, value: f64) {
        self.strengths.lock().insert(code.into(), value);
    }

    /// Stop reporting a pair code.
    pub fn remove_strength(&self, code: &str) {
        self.strengths.lock().remove(code);
    }

    /// Make subsequent fetches fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Make subsequent fetches succeed again.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl StrengthSource for MockStrengthSource {
    fn name(&self) -> &str {
        "MOCK"
    }

    async fn fetch(&self, _pairs: &[CurrencyPair]) -> StrengthResult<PairStrengths> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if let Some(message) = self.failure.lock().clone() {
            return Err(fxstrength_common::StrengthError::GenerationFailed(message));
        }

        Ok(self.strengths.lock().clone())
    }
}
