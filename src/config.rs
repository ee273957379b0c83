//! Model parameters for routing.

/// Tunable model parameters, fixed for the lifetime of a network store.
///
/// Collects every magic number of the routing model in one place: the
/// store copies this at load time and the router reads it back from the
/// store, so a store and the queries against it always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterConfig {
    /// Effective transit speed used to turn inter-station distance into
    /// riding time, in meters per minute (550 ≈ 33 km/h scheduled speed).
    pub transit_speed_m_per_min: f64,

    /// Floor for a single segment's riding time in minutes; prevents
    /// zero-time hops between co-located platforms.
    pub min_segment_minutes: f64,

    /// Transfer walking distance at which difficulty saturates, meters.
    pub transfer_cutoff_m: f64,

    /// Slope of the sigmoid that normalizes facility aggregates.
    pub sigmoid_slope: f64,

    /// Congestion factor assumed when no table entry exists.
    pub neutral_congestion: f64,

    /// Default number of relaxation rounds per query.
    pub max_rounds: u32,

    /// Label arena capacity reserved up front per query.
    pub arena_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            transit_speed_m_per_min: 550.0,
            min_segment_minutes: 1.0,
            transfer_cutoff_m: 300.0,
            sigmoid_slope: 3.0,
            neutral_congestion: 0.5,
            max_rounds: 5,
            arena_capacity: 200_000,
        }
    }
}
