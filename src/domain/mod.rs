//! Domain types for the transit router.
//!
//! Core identifier and profile types shared by the network store and the
//! router. Types that admit invalid states enforce their invariants at
//! construction time, so downstream code can trust any value it receives.

mod direction;
mod line;
mod profile;
mod station;
mod time;

pub use direction::Direction;
pub use line::LineId;
pub use profile::{DisabilityKind, DISABILITY_KIND_COUNT};
pub use station::{InvalidStationCode, StationCode, StationId};
pub use time::{DayType, InvalidTimeSlot, TimeSlot};
