//! Disability profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The rider profile a query is planned for.
///
/// Each kind carries its own facility preferences, criterion weighting and
/// walking speed (see [`crate::scoring`]). The four kinds cover wheelchair
/// users, low-vision riders, deaf and hard-of-hearing riders, and elderly
/// riders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisabilityKind {
    /// Physical / wheelchair.
    Phy,
    /// Visual impairment.
    Vis,
    /// Auditory impairment.
    Aud,
    /// Elderly.
    Eld,
}

/// Number of disability kinds; accessibility vectors have this length.
pub const DISABILITY_KIND_COUNT: usize = 4;

impl DisabilityKind {
    /// All kinds, in accessibility-vector order.
    pub const ALL: [DisabilityKind; DISABILITY_KIND_COUNT] = [
        DisabilityKind::Phy,
        DisabilityKind::Vis,
        DisabilityKind::Aud,
        DisabilityKind::Eld,
    ];

    /// Parse an external profile code.
    ///
    /// Unrecognized codes fall back to `Phy` rather than failing; callers
    /// that need strictness should validate upstream.
    pub fn from_code(code: &str) -> Self {
        match code {
            "PHY" => DisabilityKind::Phy,
            "VIS" => DisabilityKind::Vis,
            "AUD" => DisabilityKind::Aud,
            "ELD" => DisabilityKind::Eld,
            _ => DisabilityKind::Phy,
        }
    }

    /// Returns the external profile code.
    pub fn code(&self) -> &'static str {
        match self {
            DisabilityKind::Phy => "PHY",
            DisabilityKind::Vis => "VIS",
            DisabilityKind::Aud => "AUD",
            DisabilityKind::Eld => "ELD",
        }
    }

    /// Position of this kind in accessibility vectors.
    pub fn index(self) -> usize {
        match self {
            DisabilityKind::Phy => 0,
            DisabilityKind::Vis => 1,
            DisabilityKind::Aud => 2,
            DisabilityKind::Eld => 3,
        }
    }
}

impl fmt::Display for DisabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
