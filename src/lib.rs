//! Accessibility-aware transit routing.
//!
//! Answers: "given where I board, where I'm going, when I leave, and my
//! mobility profile, which journeys should I consider?" Routes are found
//! with a round-based multi-criteria label-setting search over a fixed
//! rail network, kept as a Pareto frontier across five criteria (travel
//! time, transfers, transfer difficulty, convenience, congestion), then
//! ranked by a per-profile weighting.

pub mod config;
pub mod domain;
pub mod network;
pub mod router;
pub mod scoring;
