//! Candidate ranking.
//!
//! The search returns a Pareto frontier; ranking collapses it to a single
//! preference order by a profile-weighted utility. Lower is better: every
//! criterion is normalized into [0, 1] as a penalty before weighting.

use crate::domain::DisabilityKind;
use crate::scoring;

use super::label::Label;

/// Arrival time at which the time penalty saturates, in minutes.
const TIME_CAP_MINUTES: f64 = 120.0;

/// Transfer count at which the transfer penalty saturates.
const TRANSFER_CAP: f64 = 4.0;

/// Weighted penalty of one candidate under a profile's criterion weights.
///
/// Convenience is a benefit, so it enters inverted; transfer difficulty
/// is already normalized by construction.
pub fn weighted_score(label: &Label, kind: DisabilityKind) -> f64 {
    let w = scoring::anp_weights(kind);

    w.travel_time * (label.arrival_time / TIME_CAP_MINUTES).min(1.0)
        + w.transfers * (label.transfers as f64 / TRANSFER_CAP).min(1.0)
        + w.transfer_difficulty * label.max_transfer_difficulty
        + w.convenience * (1.0 - label.avg_convenience().min(1.0))
        + w.congestion * label.avg_congestion().min(1.0)
}

/// Score and sort candidates best-first for a rider profile.
///
/// Each label's score cache is filled in; the sort is stable, so equal
/// scores keep the order the search returned them in.
pub fn rank_routes(mut routes: Vec<Label>, kind: DisabilityKind) -> Vec<Label> {
    for label in &mut routes {
        label.score = Some(weighted_score(label, kind));
    }

    routes.sort_by(|a, b| {
        let a = a.score.unwrap_or(f64::INFINITY);
        let b = b.score.unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, LineId, StationId};
    use crate::router::label::NO_PARENT;

    fn label(arrival: f64, transfers: u32, conv_sum: f64, cong_sum: f64, depth: u32) -> Label {
        Label {
            parent: NO_PARENT,
            station: StationId(0),
            line: LineId(0),
            direction: Direction::Up,
            transfers,
            arrival_time: arrival,
            convenience_sum: conv_sum,
            congestion_sum: cong_sum,
            max_transfer_difficulty: 0.0,
            depth,
            first_move: false,
            created_round: 1,
            score: None,
        }
    }

    #[test]
    fn faster_route_ranks_first_for_equal_comfort() {
        let slow = label(60.0, 0, 0.0, 0.0, 5);
        let fast = label(20.0, 0, 0.0, 0.0, 5);

        let ranked = rank_routes(vec![slow, fast], DisabilityKind::Phy);
        assert_eq!(ranked[0].arrival_time, 20.0);
        assert!(ranked[0].score.unwrap() < ranked[1].score.unwrap());
    }

    #[test]
    fn vis_prefers_convenience_over_speed() {
        // Slightly slower but far more convenient; VIS weights
        // convenience at 0.4938 and time at 0.0623.
        let fast_bare = label(30.0, 1, 0.0, 0.0, 5);
        let slow_convenient = label(38.0, 1, 4.0, 0.0, 5);

        let ranked = rank_routes(vec![fast_bare, slow_convenient], DisabilityKind::Vis);
        assert_eq!(ranked[0].arrival_time, 38.0);
    }

    #[test]
    fn transfer_heavy_route_penalized_for_phy() {
        // PHY weights transfers at 0.4826; three transfers should lose to
        // a moderately slower direct route.
        let many_transfers = label(25.0, 3, 0.0, 0.0, 8);
        let direct = label(40.0, 0, 0.0, 0.0, 8);

        let ranked = rank_routes(vec![many_transfers, direct], DisabilityKind::Phy);
        assert_eq!(ranked[0].transfers, 0);
    }

    #[test]
    fn penalties_saturate() {
        let extreme = label(100_000.0, 99, 0.0, 1_000.0, 2);
        let score = weighted_score(&extreme, DisabilityKind::Eld);
        // Every term capped at its weight; the sum can't exceed 1.
        assert!(score <= 1.0 + 1e-9);
    }

    #[test]
    fn ranking_is_idempotent() {
        let routes = vec![
            label(45.0, 1, 1.0, 2.0, 6),
            label(30.0, 2, 0.5, 1.0, 5),
            label(30.0, 2, 0.5, 1.0, 5),
            label(60.0, 0, 0.0, 3.0, 9),
        ];

        let once = rank_routes(routes, DisabilityKind::Aud);
        let twice = rank_routes(once.clone(), DisabilityKind::Aud);
        assert_eq!(once, twice);
    }

    #[test]
    fn score_cache_is_filled() {
        let ranked = rank_routes(vec![label(10.0, 0, 0.0, 0.0, 2)], DisabilityKind::Phy);
        assert!(ranked[0].score.is_some());
    }

    #[test]
    fn empty_input() {
        assert!(rank_routes(vec![], DisabilityKind::Phy).is_empty());
    }
}
