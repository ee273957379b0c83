//! Label records and the per-query arena.
//!
//! Labels form a many-to-one parent DAG (many extensions share one
//! parent), so they are kept in a single growable pool and refer to each
//! other by index rather than by owning references. The pool is cleared at
//! the start of each query and only ever appended to while the query
//! runs, so an index stays valid for the life of the query.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::{Direction, LineId, StationId};

/// Index of a label in the arena. Signed so [`NO_PARENT`] can be −1.
pub type LabelIndex = i32;

/// Sentinel parent index of origin labels.
pub const NO_PARENT: LabelIndex = -1;

/// One partial-journey state in the search.
///
/// A label says: this station was reached on this line, in this many
/// minutes since departure, with this many transfers, and with these
/// accumulated comfort criteria. The chain of parent indices back to an
/// origin label is the journey itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// Arena index of the parent label, [`NO_PARENT`] for origins.
    pub parent: LabelIndex,
    pub station: StationId,
    pub line: LineId,
    /// Direction taken to reach this station; `Unknown` for origins and
    /// transfers.
    pub direction: Direction,
    /// Transfers made so far.
    pub transfers: u32,
    /// Minutes since departure.
    pub arrival_time: f64,
    /// Sum of accessibility scores at transfer stations passed so far.
    pub convenience_sum: f64,
    /// Sum of per-segment congestion factors.
    pub congestion_sum: f64,
    /// Worst transfer difficulty seen on the chain.
    pub max_transfer_difficulty: f64,
    /// Number of labels in the chain, this one included.
    pub depth: u32,
    /// True for origin and fresh-transfer labels.
    pub first_move: bool,
    /// Round this label was minted in; gates relaxation.
    pub created_round: u32,
    /// Ranking score, filled in by the ranker.
    pub score: Option<f64>,
}

impl Label {
    /// Mean accessibility credit per chain step; 0 for an empty chain.
    pub fn avg_convenience(&self) -> f64 {
        if self.depth == 0 {
            0.0
        } else {
            self.convenience_sum / self.depth as f64
        }
    }

    /// Mean congestion per chain step; 0 for an empty chain.
    pub fn avg_congestion(&self) -> f64 {
        if self.depth == 0 {
            0.0
        } else {
            self.congestion_sum / self.depth as f64
        }
    }
}

impl Serialize for Label {
    /// Serializes the raw criteria plus the derived averages, so a
    /// returned candidate is self-describing without the arena.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Label", 12)?;
        s.serialize_field("station", &self.station)?;
        s.serialize_field("line", &self.line)?;
        s.serialize_field("direction", &self.direction)?;
        s.serialize_field("transfers", &self.transfers)?;
        s.serialize_field("arrival_time", &self.arrival_time)?;
        s.serialize_field("convenience_sum", &self.convenience_sum)?;
        s.serialize_field("congestion_sum", &self.congestion_sum)?;
        s.serialize_field("max_transfer_difficulty", &self.max_transfer_difficulty)?;
        s.serialize_field("depth", &self.depth)?;
        s.serialize_field("avg_convenience", &self.avg_convenience())?;
        s.serialize_field("avg_congestion", &self.avg_congestion())?;
        s.serialize_field("score", &self.score)?;
        s.end()
    }
}

/// Append-only label pool for one query.
pub struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    /// Create an arena with reserved capacity, avoiding early regrowth on
    /// large queries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
        }
    }

    /// Drop all labels; indices from before this call are dead.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append a label, returning its index.
    pub fn push(&mut self, label: Label) -> LabelIndex {
        let idx = self.labels.len() as LabelIndex;
        self.labels.push(label);
        idx
    }

    /// Iterate all labels minted so far, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// The label at an index, if it is live.
    pub fn get(&self, index: LabelIndex) -> Option<&Label> {
        if index < 0 {
            return None;
        }
        self.labels.get(index as usize)
    }

    /// Whether `station` appears anywhere on the parent chain starting at
    /// `index` (inclusive). Used for cycle avoidance during scans.
    pub fn chain_contains(&self, mut index: LabelIndex, station: StationId) -> bool {
        while let Some(label) = self.get(index) {
            if label.station == station {
                return true;
            }
            index = label.parent;
        }
        false
    }

    /// Re-identify a detached label copy by value match on
    /// (station, line, arrival time, transfers).
    ///
    /// Returned candidates are value copies, so float equality here is
    /// exact for any label that actually came out of this arena.
    pub fn find(&self, leaf: &Label) -> Option<LabelIndex> {
        self.labels.iter().position(|l| {
            l.station == leaf.station
                && l.line == leaf.line
                && l.arrival_time == leaf.arrival_time
                && l.transfers == leaf.transfers
        }).map(|i| i as LabelIndex)
    }
}
