//! Round-based multi-criteria label-setting search.
//!
//! Each round relaxes every label that reached a marked station in an
//! earlier round: first along its current line in both directions, then
//! across every explicit transfer edge at its station. Candidates enter a
//! station's bag only if no existing bag label dominates them under the
//! query profile's criterion weights, so the bags converge on a Pareto
//! frontier per station.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument, trace};

use crate::config::RouterConfig;
use crate::domain::{DayType, Direction, DisabilityKind, LineId, StationId, TimeSlot};
use crate::network::{AccessibilityView, NetworkStore, UnknownStation};
use crate::scoring::{self, AnpWeights};

use super::label::{Label, LabelArena, LabelIndex, NO_PARENT};

/// A routing request.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    /// Origin station code.
    pub origin: String,

    /// Destination station codes; an empty set yields an empty result.
    pub destinations: Vec<String>,

    /// Departure instant as epoch seconds (fractional accepted).
    pub departure_epoch_s: f64,

    /// Rider profile the search is planned for.
    pub kind: DisabilityKind,

    /// Relaxation round budget; `None` uses the store's configured
    /// default. Each round admits at most one additional transfer.
    pub max_rounds: Option<u32>,
}

impl RouteQuery {
    /// Create a query with the default round budget.
    pub fn new(
        origin: impl Into<String>,
        destinations: Vec<String>,
        departure_epoch_s: f64,
        kind: DisabilityKind,
    ) -> Self {
        Self {
            origin: origin.into(),
            destinations,
            departure_epoch_s,
            kind,
            max_rounds: None,
        }
    }
}

/// Pareto dominance under a profile's criterion weights.
///
/// `a` dominates `b` when it is no worse on transfers and arrival time
/// (always) and on every criterion the profile weights positively, and
/// strictly better on at least one of those. Criteria with zero weight
/// neither block dominance nor establish it.
pub fn dominates(a: &Label, b: &Label, w: &AnpWeights) -> bool {
    if a.transfers > b.transfers {
        return false;
    }
    if a.arrival_time > b.arrival_time {
        return false;
    }
    if w.transfer_difficulty > 0.0 && a.max_transfer_difficulty > b.max_transfer_difficulty {
        return false;
    }
    if w.congestion > 0.0 && a.avg_congestion() > b.avg_congestion() {
        return false;
    }
    if w.convenience > 0.0 && a.avg_convenience() < b.avg_convenience() {
        return false;
    }

    a.transfers < b.transfers
        || a.arrival_time < b.arrival_time
        || (w.transfer_difficulty > 0.0 && a.max_transfer_difficulty < b.max_transfer_difficulty)
        || (w.congestion > 0.0 && a.avg_congestion() < b.avg_congestion())
        || (w.convenience > 0.0 && a.avg_convenience() > b.avg_convenience())
}

/// Per-query immutable context: everything the relaxation steps read.
struct QueryCtx<'s> {
    store: &'s NetworkStore,
    /// Read lease on accessibility vectors, held for the whole query.
    access: AccessibilityView<'s>,
    weights: &'static AnpWeights,
    kind: DisabilityKind,
    walk_speed_m_per_min: f64,
    day: DayType,
    departure_epoch_s: f64,
    config: RouterConfig,
    dest_ids: HashSet<StationId>,
}

/// Per-station bags of label indices.
type Bags = HashMap<StationId, Vec<LabelIndex>>;

/// The multi-criteria router.
///
/// Owns the label arena, which is a per-query resource: it is cleared at
/// the start of every [`find_routes`](Self::find_routes) call, so a
/// returned candidate must be reconstructed before the next query.
pub struct McRouter<'a> {
    store: &'a NetworkStore,
    arena: LabelArena,
}

impl<'a> McRouter<'a> {
    /// Create a router over a loaded network.
    pub fn new(store: &'a NetworkStore) -> Self {
        Self {
            store,
            arena: LabelArena::with_capacity(store.config().arena_capacity),
        }
    }

    pub(super) fn store(&self) -> &'a NetworkStore {
        self.store
    }

    pub(super) fn arena(&self) -> &LabelArena {
        &self.arena
    }

    /// Find all non-dominated journeys from the query origin to any of
    /// its destinations within the round budget.
    ///
    /// Returns detached label copies; an empty vector means no journey
    /// was found, which is a valid outcome, not an error. The only error
    /// is an origin or destination code the network does not contain.
    #[instrument(skip(self, query), fields(origin = %query.origin, kind = %query.kind))]
    pub fn find_routes(&mut self, query: &RouteQuery) -> Result<Vec<Label>, UnknownStation> {
        let store = self.store;
        self.arena.clear();

        let origin = store.station_id(&query.origin)?;
        let mut dest_ids = HashSet::new();
        for code in &query.destinations {
            dest_ids.insert(store.station_id(code)?);
        }

        let kind = query.kind;
        let ctx = QueryCtx {
            store,
            access: store.accessibility(),
            weights: scoring::anp_weights(kind),
            kind,
            walk_speed_m_per_min: scoring::walking_speed_m_per_s(kind) * 60.0,
            day: DayType::from_epoch_seconds(query.departure_epoch_s),
            departure_epoch_s: query.departure_epoch_s,
            config: *store.config(),
            dest_ids,
        };
        let max_rounds = query.max_rounds.unwrap_or(ctx.config.max_rounds);

        let mut bags: Bags = HashMap::new();
        let mut marked: HashSet<StationId> = HashSet::new();

        for &line in store.lines_at(origin) {
            let idx = self.arena.push(Label {
                parent: NO_PARENT,
                station: origin,
                line,
                direction: Direction::Unknown,
                transfers: 0,
                arrival_time: 0.0,
                convenience_sum: 0.0,
                congestion_sum: 0.0,
                max_transfer_difficulty: 0.0,
                depth: 1,
                first_move: true,
                created_round: 0,
                score: None,
            });
            bags.entry(origin).or_default().push(idx);
        }
        marked.insert(origin);

        debug!(
            day = %ctx.day,
            destinations = ctx.dest_ids.len(),
            origin_lines = store.lines_at(origin).len(),
            max_rounds,
            "search initialized"
        );

        for round in 1..=max_rounds {
            if marked.is_empty() {
                break;
            }

            // Snapshot the marked set; relaxations below mark for the
            // next round directly into the drained set.
            let queue: Vec<StationId> = marked.drain().collect();
            trace!(round, queue = queue.len(), "round start");

            for u in queue {
                // Destinations are terminal; never relax out of them.
                if ctx.dest_ids.contains(&u) {
                    continue;
                }

                let Some(bag) = bags.get(&u) else { continue };
                let snapshot = bag.clone();

                for l_idx in snapshot {
                    let Some(&label) = self.arena.get(l_idx) else {
                        continue;
                    };
                    // Labels minted this round wait for the next one.
                    if label.created_round >= round {
                        continue;
                    }

                    let neighbors = store.neighbors(u, label.line);
                    self.relax_scan(
                        l_idx, &label, u, &neighbors.up, Direction::Up, round, &ctx, &mut bags,
                        &mut marked,
                    );
                    self.relax_scan(
                        l_idx,
                        &label,
                        u,
                        &neighbors.down,
                        Direction::Down,
                        round,
                        &ctx,
                        &mut bags,
                        &mut marked,
                    );
                    self.relax_transfers(l_idx, &label, u, round, &ctx, &mut bags, &mut marked);
                }
            }

            debug!(
                round,
                labels = self.arena.len(),
                marked = marked.len(),
                "round complete"
            );
        }

        // Collect destination bags by value. Destination ids are sorted
        // so the candidate order (the ranker's tie-break) is stable.
        let mut dest_sorted: Vec<StationId> = ctx.dest_ids.iter().copied().collect();
        dest_sorted.sort_unstable();

        let mut results = Vec::new();
        for d in dest_sorted {
            if let Some(bag) = bags.get(&d) {
                results.extend(bag.iter().filter_map(|&idx| self.arena.get(idx)).copied());
            }
        }

        info!(
            labels = self.arena.len(),
            candidates = results.len(),
            "search complete"
        );
        Ok(results)
    }

    /// Relax a label along one direction of its current line.
    ///
    /// Walks the neighbor list in traversal order, accumulating riding
    /// time and congestion from the boarding station. Stations already on
    /// the label's chain are skipped without advancing the distance
    /// cursor, mirroring how the list encodes physical order.
    #[allow(clippy::too_many_arguments)]
    fn relax_scan(
        &mut self,
        l_idx: LabelIndex,
        label: &Label,
        u: StationId,
        targets: &[StationId],
        direction: Direction,
        round: u32,
        ctx: &QueryCtx<'_>,
        bags: &mut Bags,
        marked: &mut HashSet<StationId>,
    ) {
        let mut cum_time = 0.0;
        let mut prev = u;

        for &v in targets {
            if self.arena.chain_contains(l_idx, v) {
                continue;
            }

            let distance = ctx.store.distance_m(prev, v);
            let seg_time = (distance / ctx.config.transit_speed_m_per_min)
                .max(ctx.config.min_segment_minutes);
            cum_time += seg_time;

            let instant = ctx.departure_epoch_s + (label.arrival_time + cum_time) * 60.0;
            let slot = TimeSlot::from_epoch_seconds(instant);
            let seg_congestion = ctx.store.congestion(prev, label.line, direction, ctx.day, slot);

            // Riding credits no accessibility points; only transfers do.
            let candidate = Label {
                parent: l_idx,
                station: v,
                line: label.line,
                direction,
                transfers: label.transfers,
                arrival_time: label.arrival_time + cum_time,
                convenience_sum: label.convenience_sum,
                congestion_sum: label.congestion_sum + seg_congestion,
                max_transfer_difficulty: label.max_transfer_difficulty,
                depth: label.depth + 1,
                first_move: false,
                created_round: round,
                score: None,
            };

            if self.try_insert(candidate, bags.entry(v).or_default(), ctx.weights, None) {
                marked.insert(v);
            }

            prev = v;
        }
    }

    /// Relax a label across every transfer edge at its station.
    fn relax_transfers(
        &mut self,
        l_idx: LabelIndex,
        label: &Label,
        u: StationId,
        round: u32,
        ctx: &QueryCtx<'_>,
        bags: &mut Bags,
        marked: &mut HashSet<StationId>,
    ) {
        for &next_line in ctx.store.lines_at(u) {
            if next_line == label.line {
                continue;
            }

            // An explicit edge is the only way to change line.
            let Some(distance) = ctx.store.transfer_distance(u, label.line, next_line) else {
                continue;
            };

            let transfer_time = distance / ctx.walk_speed_m_per_min;
            let station_score = ctx.access.score(u, ctx.kind);
            let difficulty = scoring::transfer_difficulty(
                distance,
                station_score,
                ctx.config.transfer_cutoff_m,
            );

            let candidate = Label {
                parent: l_idx,
                station: u,
                line: next_line,
                direction: Direction::Unknown,
                transfers: label.transfers + 1,
                arrival_time: label.arrival_time + transfer_time,
                convenience_sum: label.convenience_sum + station_score,
                congestion_sum: label.congestion_sum,
                max_transfer_difficulty: label.max_transfer_difficulty.max(difficulty),
                depth: label.depth + 1,
                first_move: true,
                created_round: round,
                score: None,
            };

            // Transfer candidates only compete with labels already on the
            // target line; cross-line labels at u are incomparable here.
            if self.try_insert(
                candidate,
                bags.entry(u).or_default(),
                ctx.weights,
                Some(next_line),
            ) {
                marked.insert(u);
            }
        }
    }

    /// Insert a candidate into a bag unless an existing label dominates
    /// it. Pruning is one-directional: dominated incumbents stay.
    fn try_insert(
        &mut self,
        candidate: Label,
        bag: &mut Vec<LabelIndex>,
        weights: &AnpWeights,
        same_line: Option<LineId>,
    ) -> bool {
        for &existing_idx in bag.iter() {
            let Some(existing) = self.arena.get(existing_idx) else {
                continue;
            };
            if let Some(line) = same_line {
                if existing.line != line {
                    continue;
                }
            }
            if dominates(existing, &candidate, weights) {
                return false;
            }
        }

        let idx = self.arena.push(candidate);
        bag.push(idx);
        true
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{
        FacilityRow, LineNeighborsRow, NetworkSource, StationRow, TransferRow,
    };
    use proptest::prelude::*;

    fn station(cd: &str, line: &str, lat: f64, lng: f64) -> StationRow {
        StationRow {
            station_cd: cd.into(),
            name: cd.into(),
            line: line.into(),
            lat,
            lng,
        }
    }

    fn neighbors(cd: &str, line: &str, up: &[&str], down: &[&str]) -> LineNeighborsRow {
        LineNeighborsRow {
            station_cd: cd.into(),
            line: line.into(),
            up: up.iter().map(|s| s.to_string()).collect(),
            down: down.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The two-line fixture with a variable transfer distance and
    /// variable facility counts at the transfer station.
    fn build_store(transfer_distance: f64, elevators: f64, helpers: f64) -> NetworkStore {
        let source = NetworkSource {
            stations: vec![
                station("A01", "L1", 37.5000, 127.0000),
                station("A02", "L1", 37.5010, 127.0000),
                station("A03", "L1", 37.5020, 127.0000),
                station("B05", "L2", 37.5015, 127.0005),
            ],
            line_neighbors: vec![
                neighbors("A01", "L1", &["A02", "A03"], &[]),
                neighbors("A02", "L1", &["A03"], &["A01"]),
                neighbors("A03", "L1", &[], &["A02", "A01"]),
                neighbors("A02", "L2", &["B05"], &[]),
                neighbors("B05", "L2", &[], &["A02"]),
            ],
            transfers: vec![TransferRow {
                station_cd: "A02".into(),
                from_line: "L1".into(),
                to_line: "L2".into(),
                distance: transfer_distance,
            }],
            ..Default::default()
        };

        let store = NetworkStore::load(source, RouterConfig::default());
        store.update_accessibility(&[FacilityRow {
            station_cd_list: vec!["A02".into()],
            elevator_count: elevators,
            helper_count: helpers,
            ..Default::default()
        }]);
        store
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Whatever the parameters, destination bags are Pareto frontiers
        /// and every chain respects the label invariants.
        #[test]
        fn search_maintains_invariants(
            transfer_distance in 0.0f64..800.0,
            elevators in 0.0f64..6.0,
            helpers in 0.0f64..3.0,
            departure in 1.7e9f64..1.8e9,
            kind_idx in 0usize..4,
        ) {
            let store = build_store(transfer_distance, elevators, helpers);
            let kind = DisabilityKind::ALL[kind_idx];
            let mut router = McRouter::new(&store);

            let routes = router
                .find_routes(&RouteQuery::new(
                    "A01",
                    vec!["A03".to_string(), "B05".to_string()],
                    departure,
                    kind,
                ))
                .unwrap();

            prop_assert!(!routes.is_empty());

            let weights = scoring::anp_weights(kind);
            for (i, a) in routes.iter().enumerate() {
                prop_assert!((0.0..=1.0).contains(&a.max_transfer_difficulty));
                for (j, b) in routes.iter().enumerate() {
                    if i != j && a.station == b.station {
                        prop_assert!(!dominates(a, b, weights));
                    }
                }
            }

            for label in router.arena.iter() {
                if let Some(parent) = router.arena.get(label.parent) {
                    prop_assert!(label.depth == parent.depth + 1);
                    prop_assert!(label.transfers >= parent.transfers);
                    prop_assert!(label.arrival_time >= parent.arrival_time);
                    prop_assert!(label.created_round > parent.created_round);
                }
            }
        }

        /// Dominance is irreflexive and asymmetric.
        #[test]
        fn dominance_is_a_strict_partial_order(
            arrival in 0.0f64..200.0,
            transfers in 0u32..5,
            conv in 0.0f64..5.0,
            cong in 0.0f64..5.0,
            diff in 0.0f64..1.0,
            kind_idx in 0usize..4,
        ) {
            let kind = DisabilityKind::ALL[kind_idx];
            let weights = scoring::anp_weights(kind);
            let label = Label {
                parent: NO_PARENT,
                station: StationId(0),
                line: LineId(0),
                direction: Direction::Up,
                transfers,
                arrival_time: arrival,
                convenience_sum: conv,
                congestion_sum: cong,
                max_transfer_difficulty: diff,
                depth: 3,
                first_move: false,
                created_round: 1,
                score: None,
            };

            prop_assert!(!dominates(&label, &label, weights));

            let mut better = label;
            better.arrival_time = arrival / 2.0 - 1.0;
            if better.arrival_time >= 0.0 {
                if dominates(&better, &label, weights) {
                    prop_assert!(!dominates(&label, &better, weights));
                }
            }
        }
    }
}
