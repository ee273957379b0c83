//! The network store: topology, transfers, congestion and accessibility.
//!
//! Loaded once from the source collections and immutable afterwards,
//! except for the per-station accessibility vectors which are refreshed
//! live (hourly cadence) under a writer lock. Queries take a read lease
//! for their whole duration, so a single query always sees one consistent
//! accessibility snapshot.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use geo::{HaversineDistance, Point};
use tracing::{debug, info};

use crate::config::RouterConfig;
use crate::domain::{
    DayType, Direction, DisabilityKind, LineId, StationCode, StationId, TimeSlot,
    DISABILITY_KIND_COUNT,
};
use crate::scoring;

use super::error::UnknownStation;
use super::source::{FacilityRow, NetworkSource};

/// A loaded station record.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub code: StationCode,
    pub name: String,
    /// The line this station natively belongs to.
    pub home_line: LineId,
    pub latitude: f64,
    pub longitude: f64,
}

/// Neighbor lists for one (station, line) pair, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct DirectionalNeighbors {
    pub up: Vec<StationId>,
    pub down: Vec<StationId>,
}

static EMPTY_NEIGHBORS: DirectionalNeighbors = DirectionalNeighbors {
    up: Vec::new(),
    down: Vec::new(),
};

static NO_LINES: Vec<LineId> = Vec::new();

/// Per-station accessibility vectors, read under the store's lease.
///
/// Obtained from [`NetworkStore::accessibility`]; holding this view keeps
/// the writer out, so every score read through one view belongs to the
/// same refresh generation.
pub struct AccessibilityView<'a> {
    guard: RwLockReadGuard<'a, Vec<[f64; DISABILITY_KIND_COUNT]>>,
}

impl AccessibilityView<'_> {
    /// Normalized accessibility score of a station for a rider profile.
    ///
    /// Zero for stations that have never received a facility refresh.
    pub fn score(&self, station: StationId, kind: DisabilityKind) -> f64 {
        self.guard
            .get(station.index())
            .map(|v| v[kind.index()])
            .unwrap_or(0.0)
    }
}

/// The loaded rail network.
pub struct NetworkStore {
    config: RouterConfig,

    stations: Vec<Station>,
    code_to_id: HashMap<String, StationId>,

    line_names: Vec<String>,
    line_ids: HashMap<String, LineId>,

    /// Lines each station participates in, derived from topology keys.
    station_lines: Vec<Vec<LineId>>,

    topology: HashMap<(StationId, LineId), DirectionalNeighbors>,

    /// Sequence position per (station, line), for reconstruction only.
    station_orders: HashMap<(StationId, LineId), i32>,
    /// Per-line (position, station) list, sorted by position.
    line_ordered: HashMap<LineId, Vec<(i32, StationId)>>,

    /// Walking distance in meters per (station, from-line, to-line).
    transfers: HashMap<(StationId, LineId, LineId), f64>,

    congestion: HashMap<(StationId, LineId, Direction, DayType), HashMap<TimeSlot, f64>>,

    /// Mutable accessibility vectors; everything else is frozen at load.
    scores: RwLock<Vec<[f64; DISABILITY_KIND_COUNT]>>,
}

impl NetworkStore {
    /// Load a store from the source collections.
    ///
    /// Station ids are assigned in input order; rows in the other
    /// collections that reference codes absent from `stations` are
    /// dropped. Accessibility vectors start at zero until the first
    /// [`update_accessibility`](Self::update_accessibility).
    pub fn load(source: NetworkSource, config: RouterConfig) -> Self {
        let mut stations = Vec::with_capacity(source.stations.len());
        let mut code_to_id = HashMap::with_capacity(source.stations.len());
        let mut line_names: Vec<String> = Vec::new();
        let mut line_ids: HashMap<String, LineId> = HashMap::new();

        let intern = |name: &str, names: &mut Vec<String>, ids: &mut HashMap<String, LineId>| {
            if let Some(&id) = ids.get(name) {
                return id;
            }
            let id = LineId(names.len() as u16);
            names.push(name.to_string());
            ids.insert(name.to_string(), id);
            id
        };

        for row in &source.stations {
            if code_to_id.contains_key(&row.station_cd) {
                debug!(code = %row.station_cd, "duplicate station code, keeping first");
                continue;
            }
            let Ok(code) = StationCode::parse(&row.station_cd) else {
                debug!(code = %row.station_cd, "unparseable station code, skipping");
                continue;
            };
            let id = StationId(stations.len() as u16);
            let home_line = intern(&row.line, &mut line_names, &mut line_ids);
            code_to_id.insert(row.station_cd.clone(), id);
            stations.push(Station {
                id,
                code,
                name: row.name.clone(),
                home_line,
                latitude: row.lat,
                longitude: row.lng,
            });
        }

        let mut topology = HashMap::new();
        for row in &source.line_neighbors {
            let Some(&sid) = code_to_id.get(&row.station_cd) else {
                continue;
            };
            let line = intern(&row.line, &mut line_names, &mut line_ids);
            let resolve = |codes: &[String]| -> Vec<StationId> {
                codes
                    .iter()
                    .filter_map(|cd| code_to_id.get(cd).copied())
                    .collect()
            };
            topology.insert(
                (sid, line),
                DirectionalNeighbors {
                    up: resolve(&row.up),
                    down: resolve(&row.down),
                },
            );
        }

        // Participating lines come from topology keys, not name matching:
        // a line a station can neither ride nor be scanned on must not
        // seed labels. Home line as fallback so origins still work.
        let mut station_lines = vec![Vec::new(); stations.len()];
        for &(sid, line) in topology.keys() {
            station_lines[sid.index()].push(line);
        }
        for (idx, lines) in station_lines.iter_mut().enumerate() {
            lines.sort_unstable();
            lines.dedup();
            if lines.is_empty() {
                lines.push(stations[idx].home_line);
            }
        }

        let mut station_orders = HashMap::new();
        let mut line_ordered: HashMap<LineId, Vec<(i32, StationId)>> = HashMap::new();
        for row in &source.station_order {
            let Some(&sid) = code_to_id.get(&row.station_cd) else {
                continue;
            };
            let line = intern(&row.line, &mut line_names, &mut line_ids);
            if station_orders.insert((sid, line), row.order).is_none() {
                line_ordered.entry(line).or_default().push((row.order, sid));
            }
        }
        for positions in line_ordered.values_mut() {
            positions.sort_unstable();
        }

        let mut transfers = HashMap::new();
        for row in &source.transfers {
            let Some(&sid) = code_to_id.get(&row.station_cd) else {
                continue;
            };
            let from = intern(&row.from_line, &mut line_names, &mut line_ids);
            let to = intern(&row.to_line, &mut line_names, &mut line_ids);
            transfers.insert((sid, from, to), row.distance);
        }

        let mut congestion: HashMap<_, HashMap<TimeSlot, f64>> = HashMap::new();
        for row in &source.congestion {
            let Some(&sid) = code_to_id.get(&row.station_cd) else {
                continue;
            };
            let line = intern(&row.line, &mut line_names, &mut line_ids);
            let slots: HashMap<TimeSlot, f64> = row
                .slots
                .iter()
                .filter_map(|(label, &factor)| TimeSlot::parse(label).ok().map(|s| (s, factor)))
                .collect();
            if !slots.is_empty() {
                congestion.insert((sid, line, row.direction, row.day_type), slots);
            }
        }

        let scores = RwLock::new(vec![[0.0; DISABILITY_KIND_COUNT]; stations.len()]);

        info!(
            stations = stations.len(),
            lines = line_names.len(),
            topology_keys = topology.len(),
            transfers = transfers.len(),
            congestion_keys = congestion.len(),
            "network loaded"
        );

        Self {
            config,
            stations,
            code_to_id,
            line_names,
            line_ids,
            station_lines,
            topology,
            station_orders,
            line_ordered,
            transfers,
            congestion,
            scores,
        }
    }

    /// The model parameters this store was loaded with.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Number of loaded stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of distinct line names seen across all collections.
    pub fn line_count(&self) -> usize {
        self.line_names.len()
    }

    /// Translate an external station code to its id.
    pub fn station_id(&self, code: &str) -> Result<StationId, UnknownStation> {
        self.code_to_id
            .get(code)
            .copied()
            .ok_or_else(|| UnknownStation::new(code))
    }

    /// The external code of a station id, if the id belongs to this store.
    pub fn station_code(&self, id: StationId) -> Option<&StationCode> {
        self.stations.get(id.index()).map(|s| &s.code)
    }

    /// Full station record by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    /// The interned id of a line name, if any collection mentioned it.
    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.line_ids.get(name).copied()
    }

    /// The name behind an interned line id.
    pub fn line_name(&self, line: LineId) -> &str {
        self.line_names
            .get(line.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Lines a station participates in.
    pub fn lines_at(&self, station: StationId) -> &[LineId] {
        self.station_lines
            .get(station.index())
            .unwrap_or(&NO_LINES)
    }

    /// Directional neighbor lists for (station, line); empty when the pair
    /// has no topology entry.
    pub fn neighbors(&self, station: StationId, line: LineId) -> &DirectionalNeighbors {
        self.topology
            .get(&(station, line))
            .unwrap_or(&EMPTY_NEIGHBORS)
    }

    /// Walking distance of the transfer edge (station, from, to) in
    /// meters, or `None` when that line change is not possible there.
    pub fn transfer_distance(
        &self,
        station: StationId,
        from_line: LineId,
        to_line: LineId,
    ) -> Option<f64> {
        self.transfers.get(&(station, from_line, to_line)).copied()
    }

    /// Congestion factor for a segment key, neutral when unknown.
    pub fn congestion(
        &self,
        station: StationId,
        line: LineId,
        direction: Direction,
        day: DayType,
        slot: TimeSlot,
    ) -> f64 {
        self.congestion
            .get(&(station, line, direction, day))
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or(self.config.neutral_congestion)
    }

    /// Haversine distance between two stations in meters; 0 when either
    /// id is unknown (soft miss, the segment floor still applies).
    pub fn distance_m(&self, a: StationId, b: StationId) -> f64 {
        match (self.station(a), self.station(b)) {
            (Some(a), Some(b)) => Point::new(a.longitude, a.latitude)
                .haversine_distance(&Point::new(b.longitude, b.latitude)),
            _ => 0.0,
        }
    }

    /// Take a read lease on the accessibility vectors.
    ///
    /// The returned view blocks writers until dropped; the router holds
    /// one for an entire query.
    pub fn accessibility(&self) -> AccessibilityView<'_> {
        AccessibilityView {
            guard: self.scores.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// One-off accessibility score lookup (takes a transient read lease).
    pub fn accessibility_score(&self, station: StationId, kind: DisabilityKind) -> f64 {
        self.accessibility().score(station, kind)
    }

    /// Apply a batch of facility refresh rows.
    ///
    /// For each row, the weighted facility sum per disability kind is
    /// sigmoid-normalized and assigned to every listed station. The whole
    /// batch is applied under the writer lock, so concurrent queries see
    /// either none or all of it.
    pub fn update_accessibility(&self, rows: &[FacilityRow]) {
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);

        let mut applied = 0usize;
        for row in rows {
            let counts = row.counts();
            let mut vector = [0.0; DISABILITY_KIND_COUNT];
            for kind in DisabilityKind::ALL {
                vector[kind.index()] =
                    scoring::station_score(kind, &counts, self.config.sigmoid_slope);
            }

            for code in &row.station_cd_list {
                if let Some(&sid) = self.code_to_id.get(code) {
                    scores[sid.index()] = vector;
                    applied += 1;
                }
            }
        }

        info!(rows = rows.len(), stations = applied, "accessibility refreshed");
    }

    /// Ordered stations between `from` and `to` on `line`, exclusive of
    /// `from` and inclusive of `to`.
    ///
    /// Walks the per-line order list ascending or descending depending on
    /// the two stations' positions. Falls back to `[to]` when order data
    /// is missing, so reconstruction degrades to the bare hop.
    pub fn intermediate_stations(
        &self,
        from: StationId,
        to: StationId,
        line: LineId,
    ) -> Vec<StationId> {
        let (Some(&from_order), Some(&to_order)) = (
            self.station_orders.get(&(from, line)),
            self.station_orders.get(&(to, line)),
        ) else {
            return vec![to];
        };

        let Some(positions) = self.line_ordered.get(&line) else {
            return vec![to];
        };

        let mut result = Vec::new();
        if from_order < to_order {
            for &(order, sid) in positions {
                if order > from_order && order <= to_order {
                    result.push(sid);
                }
            }
        } else {
            for &(order, sid) in positions.iter().rev() {
                if order < from_order && order >= to_order {
                    result.push(sid);
                }
            }
        }

        if result.is_empty() {
            result.push(to);
        }
        result
    }
}
