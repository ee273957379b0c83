//! Network lookup errors.

/// Error returned when translating a station code the network does not
/// contain.
///
/// This is the only hard lookup failure in the store: every other miss
/// (congestion, transfers, order data, accessibility) soft-defaults, since
/// the router must tolerate sparse data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station code: {code}")]
pub struct UnknownStation {
    /// The code that failed to resolve.
    pub code: String,
}

impl UnknownStation {
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
