//! Multi-criteria router: label arena, round-based search, ranking and
//! path reconstruction.
//!
//! The search keeps, per station, a bag of mutually non-dominated labels
//! across five criteria (travel time, transfers, transfer difficulty,
//! convenience, congestion) and relaxes them in rounds, each round
//! admitting at most one more transfer. Candidates that reach a
//! destination are ranked by a profile-weighted penalty, and any of them
//! can be expanded back into a station-by-station journey.

mod label;
mod rank;
mod reconstruct;
mod search;

pub use label::{Label, LabelArena, LabelIndex, NO_PARENT};
pub use rank::{rank_routes, weighted_score};
pub use reconstruct::PathNode;
pub use search::{dominates, McRouter, RouteQuery};
