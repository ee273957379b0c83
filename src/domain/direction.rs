//! Travel direction along a line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of travel used to reach a station.
///
/// Scans along a line produce `Up` or `Down`; circular lines appear in
/// congestion data as `In`/`Out`. Transfers and origin labels have no
/// meaningful direction and carry `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    In,
    Out,
    Unknown,
}

impl Direction {
    /// Parse a direction from its source-data string form.
    ///
    /// Anything other than the four known forms maps to `Unknown`, which
    /// matches how sparse congestion rows are tolerated elsewhere.
    pub fn parse(s: &str) -> Self {
        match s {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "in" => Direction::In,
            "out" => Direction::Out,
            _ => Direction::Unknown,
        }
    }

    /// Returns the source-data string form, or `""` for `Unknown`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Unknown => "",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_forms() {
        assert_eq!(Direction::parse("up"), Direction::Up);
        assert_eq!(Direction::parse("down"), Direction::Down);
        assert_eq!(Direction::parse("in"), Direction::In);
        assert_eq!(Direction::parse("out"), Direction::Out);
    }

    #[test]
    fn parse_unknown_forms() {
        assert_eq!(Direction::parse(""), Direction::Unknown);
        assert_eq!(Direction::parse("UP"), Direction::Unknown);
        assert_eq!(Direction::parse("sideways"), Direction::Unknown);
    }

    #[test]
    fn string_roundtrip() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::In,
            Direction::Out,
        ] {
            assert_eq!(Direction::parse(dir.as_str()), dir);
        }
    }
}
