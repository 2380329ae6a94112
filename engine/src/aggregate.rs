//! Per-currency aggregation of pair strengths.

use std::collections::BTreeMap;

use fxstrength_common::{Currency, CurrencyPair};
use tracing::trace;

use crate::snapshot::{round_dp, CurrencyAggregates, PairStrengths};

/// Aggregate pair strengths into per-currency scores, counts and averages.
///
/// Each pair adds its strength to the base currency and subtracts it from
/// the quote currency. Keys that are not a 6-letter code of two distinct
/// known currencies are skipped. Every known currency is present in the
/// output, with a 0.0 average when no pair touches it.
pub fn aggregate(strengths: &PairStrengths) -> CurrencyAggregates {
    let mut scores: BTreeMap<Currency, f64> = Currency::ALL.iter().map(|c| (*c, 0.0)).collect();
    let mut counts: BTreeMap<Currency, u32> = Currency::ALL.iter().map(|c| (*c, 0)).collect();

    for (code, &strength) in strengths {
        let Some(pair) = CurrencyPair::from_code(code) else {
            trace!(pair = %code, "Skipping unrecognized pair");
            continue;
        };

        *scores.entry(pair.base).or_default() += strength;
        *counts.entry(pair.base).or_default() += 1;
        *scores.entry(pair.quote).or_default() -= strength;
        *counts.entry(pair.quote).or_default() += 1;
    }

    let averages = Currency::ALL
        .iter()
        .map(|c| {
            let count = counts[c];
            let average = if count > 0 {
                round_dp(scores[c] / f64::from(count), 2)
            } else {
                0.0
            };
            (*c, average)
        })
        .collect();

    CurrencyAggregates {
        scores,
        counts,
        averages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strengths(entries: &[(&str, f64)]) -> PairStrengths {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_two_pairs_against_usd() {
        let result = aggregate(&strengths(&[("EURUSD", 5.0), ("GBPUSD", 4.0)]));

        assert_eq!(result.scores[&Currency::Eur], 5.0);
        assert_eq!(result.counts[&Currency::Eur], 1);
        assert_eq!(result.averages[&Currency::Eur], 5.0);

        assert_eq!(result.scores[&Currency::Gbp], 4.0);
        assert_eq!(result.counts[&Currency::Gbp], 1);
        assert_eq!(result.averages[&Currency::Gbp], 4.0);

        assert_eq!(result.scores[&Currency::Usd], -9.0);
        assert_eq!(result.counts[&Currency::Usd], 2);
        assert_eq!(result.averages[&Currency::Usd], -4.5);

        for c in [
            Currency::Chf,
            Currency::Cad,
            Currency::Aud,
            Currency::Jpy,
            Currency::Nzd,
        ] {
            assert_eq!(result.scores[&c], 0.0);
            assert_eq!(result.counts[&c], 0);
            assert_eq!(result.averages[&c], 0.0);
        }
    }

    #[test]
    fn test_empty_input_covers_all_currencies() {
        let result = aggregate(&PairStrengths::new());

        assert_eq!(result.scores.len(), 8);
        assert_eq!(result.counts.len(), 8);
        assert_eq!(result.averages.len(), 8);
        assert!(result.averages.values().all(|a| *a == 0.0));
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let baseline = aggregate(&strengths(&[("EURUSD", 5.0)]));
        let noisy = aggregate(&strengths(&[
            ("EURUSD", 5.0),
            ("XXXYYY", 6.0),
            ("EURUS", 4.0),
            ("EURUSDT", 4.0),
            ("EUREUR", 3.0),
            ("eurusd", 3.0),
        ]));

        assert_eq!(noisy, baseline);
    }

    #[test]
    fn test_average_is_rounded() {
        let result = aggregate(&strengths(&[
            ("EURUSD", 5.1),
            ("EURGBP", 3.3),
            ("EURJPY", 4.4),
        ]));

        // 12.8 / 3 = 4.2666...
        assert_eq!(result.counts[&Currency::Eur], 3);
        assert_eq!(result.averages[&Currency::Eur], 4.27);
    }

    fn static_strengths() -> impl Strategy<Value = PairStrengths> {
        prop::collection::vec(30u32..=70, fxstrength_common::STATIC_PAIRS.len()).prop_map(
            |tenths| {
                fxstrength_common::STATIC_PAIRS
                    .iter()
                    .zip(tenths)
                    .map(|(pair, t)| (pair.code(), f64::from(t) / 10.0))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_scores_sum_to_zero(input in static_strengths()) {
            let result = aggregate(&input);
            let total: f64 = result.scores.values().sum();
            prop_assert!(total.abs() < 1e-9, "score sum was {}", total);
        }

        #[test]
        fn prop_average_follows_count(input in static_strengths()) {
            let result = aggregate(&input);
            for c in Currency::ALL {
                let count = result.counts[&c];
                let average = result.averages[&c];
                if count == 0 {
                    prop_assert_eq!(average, 0.0);
                } else {
                    prop_assert_eq!(average, round_dp(result.scores[&c] / f64::from(count), 2));
                }
            }
        }

        #[test]
        fn prop_counts_match_pairs(input in static_strengths()) {
            let result = aggregate(&input);
            let total: u32 = result.counts.values().sum();
            prop_assert_eq!(total as usize, input.len() * 2);
        }
    }
}
