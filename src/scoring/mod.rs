//! Static scoring tables and normalization functions.
//!
//! Everything here is a pure function over compile-time constants: which
//! facilities each rider profile cares about, how the five routing
//! criteria are weighted per profile, profile walking speeds, and the
//! sigmoid/difficulty formulas built on top of them.

mod convenience;
mod weights;

pub use convenience::{sigmoid, station_score, transfer_difficulty};
pub use weights::{
    anp_weights, facility_weights, walking_speed_m_per_s, AnpWeights, FacilityCounts,
    FacilityWeights,
};
