//! Path reconstruction.
//!
//! Candidates returned by the search are detached copies; to expand one
//! into the station-by-station journey, it is first re-identified in the
//! router's arena by value, then its parent chain is walked back to the
//! origin. Intra-line hops are expanded into their intermediate stations
//! through the store's order data, and a same-station line change
//! collapses to a single node.

use crate::domain::{Direction, LineId, StationId};

use super::label::{Label, NO_PARENT};
use super::search::McRouter;

/// One station visit in a reconstructed journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub station: StationId,
    /// Line being ridden when this station is visited.
    pub line: LineId,
    /// Direction of travel into this station.
    pub direction: Direction,
}

impl McRouter<'_> {
    /// Expand a returned candidate into the full ordered station path.
    ///
    /// Returns an empty path when the label cannot be found in the arena,
    /// which happens if another query has run since it was returned.
    pub fn reconstruct_path(&self, leaf: &Label) -> Vec<PathNode> {
        let Some(leaf_idx) = self.arena().find(leaf) else {
            return Vec::new();
        };

        // Leaf to root, then flip.
        let mut chain: Vec<Label> = Vec::new();
        let mut idx = leaf_idx;
        while idx != NO_PARENT {
            let Some(&label) = self.arena().get(idx) else {
                break;
            };
            chain.push(label);
            idx = label.parent;
        }
        chain.reverse();

        let mut path = Vec::new();
        for (i, curr) in chain.iter().enumerate() {
            if i == 0 {
                path.push(PathNode {
                    station: curr.station,
                    line: curr.line,
                    direction: curr.direction,
                });
                continue;
            }

            let prev = &chain[i - 1];
            if prev.line != curr.line {
                // A transfer at the same station is one physical place;
                // emit a node only when the station actually changes.
                if curr.station != prev.station {
                    path.push(PathNode {
                        station: curr.station,
                        line: curr.line,
                        direction: curr.direction,
                    });
                }
            } else {
                for station in
                    self.store()
                        .intermediate_stations(prev.station, curr.station, curr.line)
                {
                    path.push(PathNode {
                        station,
                        line: curr.line,
                        direction: curr.direction,
                    });
                }
            }
        }

        path
    }

    /// The reconstructed journey as external station codes.
    pub fn route_codes(&self, leaf: &Label) -> Vec<String> {
        self.reconstruct_path(leaf)
            .iter()
            .filter_map(|node| self.store().station_code(node.station))
            .map(|code| code.as_str().to_string())
            .collect()
    }

    /// The line ridden at each step of the reconstructed journey, parallel
    /// to [`route_codes`](Self::route_codes).
    pub fn route_lines(&self, leaf: &Label) -> Vec<String> {
        self.reconstruct_path(leaf)
            .iter()
            .map(|node| self.store().line_name(node.line).to_string())
            .collect()
    }
}
