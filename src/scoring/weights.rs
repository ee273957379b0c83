//! Per-profile weight tables.
//!
//! All weights are compile-time constants. Facility weights express how
//! much a rider profile values each station facility on a 0.0–5.0 scale
//! (5.0 = must have, 3.0 = nice to have, 0.0 = irrelevant). ANP weights
//! distribute importance across the five routing criteria and are
//! normalized to sum to 1 per profile.

use crate::domain::DisabilityKind;

/// Station facility counts, one slot per tracked facility category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FacilityCounts {
    /// Wheelchair rapid chargers.
    pub chargers: f64,
    pub elevators: f64,
    pub escalators: f64,
    pub lifts: f64,
    pub moving_walks: f64,
    /// Platform gap fillers.
    pub safe_platforms: f64,
    /// Sign-language video phones.
    pub sign_phones: f64,
    /// Accessible toilets.
    pub toilets: f64,
    /// Staffed mobility assistance.
    pub helpers: f64,
}

/// Per-profile preference weights over the facility categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityWeights {
    pub charger: f64,
    pub elevator: f64,
    pub escalator: f64,
    pub lift: f64,
    pub moving_walk: f64,
    pub safe_platform: f64,
    pub sign_phone: f64,
    pub toilet: f64,
    pub helper: f64,
}

impl FacilityWeights {
    /// Weighted sum of facility counts under these preferences.
    pub fn weighted_sum(&self, counts: &FacilityCounts) -> f64 {
        counts.chargers * self.charger
            + counts.elevators * self.elevator
            + counts.escalators * self.escalator
            + counts.lifts * self.lift
            + counts.moving_walks * self.moving_walk
            + counts.safe_platforms * self.safe_platform
            + counts.sign_phones * self.sign_phone
            + counts.toilets * self.toilet
            + counts.helpers * self.helper
    }
}

const FACILITY_PHY: FacilityWeights = FacilityWeights {
    charger: 3.0,
    elevator: 5.0,
    escalator: 3.0,
    lift: 2.0,
    moving_walk: 2.0,
    safe_platform: 5.0,
    sign_phone: 0.0,
    toilet: 3.0,
    helper: 4.0,
};

const FACILITY_VIS: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 3.0,
    escalator: 3.0,
    lift: 0.0,
    moving_walk: 2.0,
    safe_platform: 5.0,
    sign_phone: 0.0,
    toilet: 0.0,
    helper: 4.0,
};

const FACILITY_AUD: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 3.0,
    escalator: 3.0,
    lift: 0.0,
    moving_walk: 2.0,
    safe_platform: 3.0,
    sign_phone: 4.5,
    toilet: 0.0,
    helper: 4.0,
};

const FACILITY_ELD: FacilityWeights = FacilityWeights {
    charger: 0.0,
    elevator: 4.0,
    escalator: 4.0,
    lift: 0.0,
    moving_walk: 4.0,
    safe_platform: 4.0,
    sign_phone: 0.0,
    toilet: 1.0,
    helper: 4.0,
};

/// Facility preference weights for a rider profile.
pub fn facility_weights(kind: DisabilityKind) -> &'static FacilityWeights {
    match kind {
        DisabilityKind::Phy => &FACILITY_PHY,
        DisabilityKind::Vis => &FACILITY_VIS,
        DisabilityKind::Aud => &FACILITY_AUD,
        DisabilityKind::Eld => &FACILITY_ELD,
    }
}

/// Normalized weights over the five routing criteria.
///
/// Used both by the dominance rule (criteria with zero weight do not
/// participate) and by ranking. Each profile's weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnpWeights {
    pub travel_time: f64,
    pub transfers: f64,
    pub transfer_difficulty: f64,
    pub convenience: f64,
    pub congestion: f64,
}

// Principal-eigenvector weights of the per-profile pairwise comparison
// matrices, precomputed offline.
const ANP_PHY: AnpWeights = AnpWeights {
    travel_time: 0.0543,
    transfers: 0.4826,
    transfer_difficulty: 0.2391,
    convenience: 0.1196,
    congestion: 0.1044,
};

const ANP_VIS: AnpWeights = AnpWeights {
    travel_time: 0.0623,
    transfers: 0.1198,
    transfer_difficulty: 0.2043,
    convenience: 0.4938,
    congestion: 0.1198,
};

const ANP_AUD: AnpWeights = AnpWeights {
    travel_time: 0.1519,
    transfers: 0.2938,
    transfer_difficulty: 0.0823,
    convenience: 0.3897,
    congestion: 0.0823,
};

const ANP_ELD: AnpWeights = AnpWeights {
    travel_time: 0.0739,
    transfers: 0.1304,
    transfer_difficulty: 0.2174,
    convenience: 0.0609,
    congestion: 0.5174,
};

/// Criterion weights for a rider profile.
pub fn anp_weights(kind: DisabilityKind) -> &'static AnpWeights {
    match kind {
        DisabilityKind::Phy => &ANP_PHY,
        DisabilityKind::Vis => &ANP_VIS,
        DisabilityKind::Aud => &ANP_AUD,
        DisabilityKind::Eld => &ANP_ELD,
    }
}

/// Walking speed in meters per second for a rider profile.
///
/// Converts transfer walking distance into transfer time:
/// `minutes = distance_m / (speed * 60)`.
pub fn walking_speed_m_per_s(kind: DisabilityKind) -> f64 {
    match kind {
        DisabilityKind::Phy => 0.50,
        DisabilityKind::Vis => 0.80,
        DisabilityKind::Aud => 0.98,
        DisabilityKind::Eld => 0.70,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anp_weights_sum_to_one() {
        for kind in DisabilityKind::ALL {
            let w = anp_weights(kind);
            let sum =
                w.travel_time + w.transfers + w.transfer_difficulty + w.convenience + w.congestion;
            assert!(
                (sum - 1.0).abs() < 1e-3,
                "{kind} weights sum to {sum}, expected 1"
            );
        }
    }

    #[test]
    fn anp_weights_nonnegative() {
        for kind in DisabilityKind::ALL {
            let w = anp_weights(kind);
            for v in [
                w.travel_time,
                w.transfers,
                w.transfer_difficulty,
                w.convenience,
                w.congestion,
            ] {
                assert!(v >= 0.0);
            }
        }
    }

    #[test]
    fn facility_weights_in_scale() {
        for kind in DisabilityKind::ALL {
            let w = facility_weights(kind);
            for v in [
                w.charger,
                w.elevator,
                w.escalator,
                w.lift,
                w.moving_walk,
                w.safe_platform,
                w.sign_phone,
                w.toilet,
                w.helper,
            ] {
                assert!((0.0..=5.0).contains(&v));
            }
        }
    }

    #[test]
    fn weighted_sum_counts_each_category() {
        let counts = FacilityCounts {
            elevators: 2.0,
            helpers: 1.0,
            ..Default::default()
        };
        let sum = facility_weights(DisabilityKind::Phy).weighted_sum(&counts);
        assert!((sum - (2.0 * 5.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn weighted_sum_of_nothing_is_zero() {
        let counts = FacilityCounts::default();
        for kind in DisabilityKind::ALL {
            assert_eq!(facility_weights(kind).weighted_sum(&counts), 0.0);
        }
    }

    #[test]
    fn walking_speeds_are_positive() {
        for kind in DisabilityKind::ALL {
            assert!(walking_speed_m_per_s(kind) > 0.0);
        }
    }

    #[test]
    fn wheelchair_walks_slowest() {
        let phy = walking_speed_m_per_s(DisabilityKind::Phy);
        for kind in [DisabilityKind::Vis, DisabilityKind::Aud, DisabilityKind::Eld] {
            assert!(phy < walking_speed_m_per_s(kind));
        }
    }
}
