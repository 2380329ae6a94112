//! Strength snapshot types.

use std::collections::BTreeMap;

use fxstrength_common::{Currency, Timestamp};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest strength value a source may report.
pub const MIN_STRENGTH: f64 = 3.0;

/// Highest strength value a source may report.
pub const MAX_STRENGTH: f64 = 7.0;

/// Strength values keyed by 6-letter pair code.
pub type PairStrengths = BTreeMap<String, f64>;

/// Per-currency aggregates derived from a set of pair strengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAggregates {
    /// Signed sum of strengths (base adds, quote subtracts).
    pub scores: BTreeMap<Currency, f64>,
    /// Number of pairs touching each currency.
    pub counts: BTreeMap<Currency, u32>,
    /// `score / count` rounded to 2 decimals, 0.0 when count is 0.
    pub averages: BTreeMap<Currency, f64>,
}

/// Immutable timestamped bundle of pair strengths and their aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was generated.
    pub timestamp: Timestamp,
    /// Raw strength per pair.
    pub strength_data: PairStrengths,
    /// Aggregates over `strength_data`.
    pub currency_aggregates: CurrencyAggregates,
}

impl Snapshot {
    /// Assemble a snapshot.
    pub fn new(
        timestamp: Timestamp,
        strength_data: PairStrengths,
        currency_aggregates: CurrencyAggregates,
    ) -> Self {
        Self {
            timestamp,
            strength_data,
            currency_aggregates,
        }
    }
}

/// Round to `dp` decimal places, half to even.
///
/// Non-finite input is returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .and_then(|d| d.round_dp(dp).to_f64())
        .unwrap_or(value)
}

/// Check a value against the strength contract: within
/// [`MIN_STRENGTH`, `MAX_STRENGTH`] with at most one decimal digit.
pub fn is_valid_strength(value: f64) -> bool {
    (MIN_STRENGTH..=MAX_STRENGTH).contains(&value) && round_dp(value, 1) == value
}
