//! Accessibility score normalization and transfer difficulty.

use crate::domain::DisabilityKind;

use super::weights::{facility_weights, FacilityCounts};

/// Sigmoid normalization `1 / (1 + e^(-k·x))`.
///
/// Bounds an unbounded facility aggregate into (0, 1); `k` controls how
/// quickly well-equipped stations saturate.
pub fn sigmoid(x: f64, slope: f64) -> f64 {
    1.0 / (1.0 + (-slope * x).exp())
}

/// Normalized accessibility score of a station for one rider profile.
///
/// Weighted facility sum passed through the sigmoid. With nonnegative
/// counts the result is at least 0.5; stations with no reported
/// facilities keep their load-time score of 0.
pub fn station_score(kind: DisabilityKind, counts: &FacilityCounts, slope: f64) -> f64 {
    sigmoid(facility_weights(kind).weighted_sum(counts), slope)
}

/// Difficulty of one transfer, in [0, 1].
///
/// `0.6 · min(distance/cutoff, 1) + 0.4 · (1 − convenience)`, where
/// `convenience` is the transfer station's normalized accessibility score
/// for the query's profile. Long walks dominate; a well-equipped station
/// can only soften, never erase, a long corridor.
pub fn transfer_difficulty(distance_m: f64, station_convenience: f64, cutoff_m: f64) -> f64 {
    let distance_score = (distance_m / cutoff_m).min(1.0);
    let inconvenience = 1.0 - station_convenience.clamp(0.0, 1.0);
    0.6 * distance_score + 0.4 * inconvenience
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sigmoid output stays strictly inside (0, 1) before the
        /// exponential underflows to zero.
        #[test]
        fn sigmoid_in_unit_interval(x in -5.0f64..5.0, slope in 0.3f64..3.0) {
            let v = sigmoid(x, slope);
            prop_assert!(v > 0.0 && v < 1.0);
        }

        /// Transfer difficulty is always in [0, 1] for sane inputs.
        #[test]
        fn difficulty_in_unit_interval(
            distance in 0.0f64..5000.0,
            convenience in 0.0f64..1.0,
        ) {
            let d = transfer_difficulty(distance, convenience, 300.0);
            prop_assert!((0.0..=1.0).contains(&d));
        }

        /// More distance never makes a transfer easier.
        #[test]
        fn difficulty_monotone_in_distance(
            d1 in 0.0f64..5000.0,
            d2 in 0.0f64..5000.0,
            convenience in 0.0f64..1.0,
        ) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(
                transfer_difficulty(lo, convenience, 300.0)
                    <= transfer_difficulty(hi, convenience, 300.0)
            );
        }
    }
}
