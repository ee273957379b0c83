//! Line identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interned handle for a line name.
///
/// Line names are strings in source data and queries ("L1", "5호선"), but
/// labels are minted by the hundred thousand per query and compare lines
/// constantly, so the store interns each distinct name once and hands out
/// this index. The store that issued a `LineId` owns the reverse mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u16);

impl LineId {
    /// Returns the id as a usize for table indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}
