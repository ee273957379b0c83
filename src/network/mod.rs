//! The network store and its loader inputs.
//!
//! Owns the immutable rail topology (stations, per-line neighbor lists,
//! transfer edges, congestion tables) and the mutable per-station
//! accessibility vectors, and answers every graph lookup the router
//! makes.

mod error;
mod source;
mod store;

pub use error::UnknownStation;
pub use source::{
    CongestionRow, FacilityRow, LineNeighborsRow, NetworkSource, StationOrderRow, StationRow,
    TransferRow,
};
pub use store::{AccessibilityView, DirectionalNeighbors, NetworkStore, Station};
