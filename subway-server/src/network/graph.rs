//! Weighted station graph built from the line/section catalog.
//!
//! Stations become nodes addressed by a dense index; sections become
//! undirected edges. When several sections join the same pair of stations
//! only the cheapest survives, so the path finder never has to consider
//! parallel edges.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::domain::{Line, LineId, Station, StationId, TopologyError};

/// An edge as seen from one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Index of the node at the other end.
    pub to: usize,
    pub distance: u32,
    /// Line of the section that won the merge.
    pub line: LineId,
    pub surcharge: u32,
}

/// Candidate for the surviving edge of an unordered station pair.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: u32,
    surcharge: u32,
    line: LineId,
}

impl Candidate {
    fn key(&self) -> (u32, u32, LineId) {
        (self.distance, self.surcharge, self.line)
    }
}

/// Immutable, index-based station network.
///
/// Node indices follow ascending station id, and every adjacency list is
/// sorted by neighbour index, so iterating neighbours visits them in station
/// id order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<StationId>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Build the graph from the registered stations and all lines.
    ///
    /// Every registered station becomes a node, even one that no section
    /// touches. The build fails as a whole on the first section that
    /// references an unknown station, has zero distance, or loops back on
    /// its own station.
    pub fn build(stations: &[Station], lines: &[Line]) -> Result<Self, TopologyError> {
        let mut nodes: Vec<StationId> = stations.iter().map(|s| s.id).collect();
        nodes.sort_unstable();
        nodes.dedup();

        let index_of = |id: StationId| nodes.binary_search(&id).ok();

        let mut pairs: BTreeMap<(usize, usize), Candidate> = BTreeMap::new();

        for line in lines {
            for section in &line.sections {
                if section.up == section.down {
                    return Err(TopologyError::SelfLoop {
                        line: line.id,
                        station: section.up,
                    });
                }
                if section.distance == 0 {
                    return Err(TopologyError::NonPositiveDistance {
                        line: line.id,
                        up: section.up,
                        down: section.down,
                    });
                }

                let up = index_of(section.up).ok_or(TopologyError::UnknownStation {
                    line: line.id,
                    station: section.up,
                })?;
                let down = index_of(section.down).ok_or(TopologyError::UnknownStation {
                    line: line.id,
                    station: section.down,
                })?;

                let candidate = Candidate {
                    distance: section.distance,
                    surcharge: line.surcharge,
                    line: line.id,
                };

                match pairs.entry((up.min(down), up.max(down))) {
                    Entry::Vacant(slot) => {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(mut slot) => {
                        if candidate.key() < slot.get().key() {
                            slot.insert(candidate);
                        }
                    }
                }
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for ((a, b), c) in &pairs {
            adjacency[*a].push(Edge {
                to: *b,
                distance: c.distance,
                line: c.line,
                surcharge: c.surcharge,
            });
            adjacency[*b].push(Edge {
                to: *a,
                distance: c.distance,
                line: c.line,
                surcharge: c.surcharge,
            });
        }
        for edges in &mut adjacency {
            edges.sort_unstable_by_key(|e| e.to);
        }

        debug!(
            nodes = nodes.len(),
            edges = pairs.len(),
            lines = lines.len(),
            "Built station graph"
        );

        Ok(Self { nodes, adjacency })
    }

    /// Number of stations in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges after merging.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Dense index of a station, if it is a node.
    pub fn index_of(&self, id: StationId) -> Option<usize> {
        self.nodes.binary_search(&id).ok()
    }

    /// Station id at a node index.
    ///
    /// Panics if the index is out of range; indices only come from this graph.
    pub fn station_at(&self, index: usize) -> StationId {
        self.nodes[index]
    }

    /// Edges leaving a node, ordered by neighbour station id.
    pub fn neighbours(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    /// The merged edge between two stations, if they are adjacent.
    #[cfg(test)]
    pub(crate) fn edge_between(&self, a: StationId, b: StationId) -> Option<&Edge> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.adjacency[a].iter().find(|e| e.to == b)
    }
}
