//! Station identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// Dense numeric station identifier, assigned at load time.
///
/// Ids index directly into the store's per-station tables, so they are
/// only meaningful for the network snapshot that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub u16);

impl StationId {
    /// Returns the id as a usize for table indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An external station code, the key used by queries and source data.
///
/// Codes are opaque to the router (e.g. `"0150"`, `"A01"`); this type only
/// guarantees the code is non-empty printable ASCII with no whitespace, so
/// any `StationCode` value is usable as a lookup key by construction.
///
/// # Examples
///
/// ```
/// use access_router::domain::StationCode;
///
/// let code = StationCode::parse("A01").unwrap();
/// assert_eq!(code.as_str(), "A01");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("A 01").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_graphic() {
                return Err(InvalidStationCode {
                    reason: "must be printable ASCII without whitespace",
                });
            }
        }

        Ok(StationCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("0150").is_ok());
        assert!(StationCode::parse("A01").is_ok());
        assert!(StationCode::parse("X").is_ok());
        assert!(StationCode::parse("2534-b").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationCode::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(StationCode::parse("A 01").is_err());
        assert!(StationCode::parse(" A01").is_err());
        assert!(StationCode::parse("A01\t").is_err());
    }

    #[test]
    fn reject_non_ascii() {
        assert!(StationCode::parse("駅01").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let code = StationCode::parse("0150").unwrap();
        assert_eq!(code.as_str(), "0150");
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("A01").unwrap();
        assert_eq!(format!("{}", code), "A01");
        assert_eq!(format!("{:?}", code), "StationCode(A01)");
    }

    #[test]
    fn station_id_index() {
        assert_eq!(StationId(7).index(), 7);
        assert_eq!(format!("{}", StationId(7)), "#7");
    }
}
