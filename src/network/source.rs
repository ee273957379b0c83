//! Source collections consumed by the network loader.
//!
//! These rows mirror the tabular shape the ingestion pipeline produces.
//! Keys are external station codes and line names as strings; resolution
//! to internal ids happens inside the store, and rows referencing unknown
//! stations are skipped rather than rejected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DayType, Direction};
use crate::scoring::FacilityCounts;

/// One station record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRow {
    pub station_cd: String,
    pub name: String,
    /// The line this station natively belongs to.
    pub line: String,
    pub lat: f64,
    pub lng: f64,
}

/// Directional neighbor lists for one (station, line) pair.
///
/// Each list holds the station codes reachable without transfer in that
/// direction, in physical traversal order starting from this station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineNeighborsRow {
    pub station_cd: String,
    pub line: String,
    #[serde(default)]
    pub up: Vec<String>,
    #[serde(default)]
    pub down: Vec<String>,
}

/// Sequence position of a station on a line, for intermediate-station
/// enumeration during reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationOrderRow {
    pub station_cd: String,
    pub line: String,
    pub order: i32,
}

/// A legal line change at a station, with its walking distance.
///
/// Existence of a row is the sole criterion by which the router may change
/// from `from_line` to `to_line` at this station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRow {
    pub station_cd: String,
    pub from_line: String,
    pub to_line: String,
    /// Walking distance in meters.
    pub distance: f64,
}

/// Congestion factors for one (station, line, direction, day) key, as a
/// map from half-hour slot label (`"t_480"`) to a nonnegative factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CongestionRow {
    pub station_cd: String,
    pub line: String,
    pub direction: Direction,
    pub day_type: DayType,
    #[serde(default)]
    pub slots: HashMap<String, f64>,
}

/// The five collections a store is loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSource {
    #[serde(default)]
    pub stations: Vec<StationRow>,
    #[serde(default)]
    pub line_neighbors: Vec<LineNeighborsRow>,
    #[serde(default)]
    pub station_order: Vec<StationOrderRow>,
    #[serde(default)]
    pub transfers: Vec<TransferRow>,
    #[serde(default)]
    pub congestion: Vec<CongestionRow>,
}

/// One accessibility refresh row: raw facility counts applied to every
/// listed station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityRow {
    pub station_cd_list: Vec<String>,
    #[serde(default)]
    pub charger_count: f64,
    #[serde(default)]
    pub elevator_count: f64,
    #[serde(default)]
    pub escalator_count: f64,
    #[serde(default)]
    pub lift_count: f64,
    #[serde(default)]
    pub movingwalk_count: f64,
    #[serde(default)]
    pub safe_platform_count: f64,
    #[serde(default)]
    pub sign_phone_count: f64,
    #[serde(default)]
    pub toilet_count: f64,
    #[serde(default)]
    pub helper_count: f64,
}

impl FacilityRow {
    /// The row's counts in scoring form.
    pub fn counts(&self) -> FacilityCounts {
        FacilityCounts {
            chargers: self.charger_count,
            elevators: self.elevator_count,
            escalators: self.escalator_count,
            lifts: self.lift_count,
            moving_walks: self.movingwalk_count,
            safe_platforms: self.safe_platform_count,
            sign_phones: self.sign_phone_count,
            toilets: self.toilet_count,
            helpers: self.helper_count,
        }
    }
}
