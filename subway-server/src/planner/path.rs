//! Shortest-path search over the station graph.
//!
//! Routes are compared by total distance, then by number of hops, then by
//! the station id sequence. The search runs Dijkstra twice (from the origin
//! and from the destination, the graph being undirected) and then walks
//! forward from the origin, at every step taking the lowest-id neighbour
//! that still lies on an optimal route. Because all optimal routes have the
//! same number of hops, this greedy walk yields the lexicographically
//! smallest station sequence.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::trace;

use crate::domain::{LineId, StationId};
use crate::network::Graph;

/// Error from a path query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Origin and destination are the same station
    #[error("origin and destination are the same station: {0}")]
    SameStation(StationId),

    /// Station is not part of the network
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// Both stations exist but no route connects them
    #[error("no path from {from} to {to}")]
    NoPath { from: StationId, to: StationId },
}

/// One hop of a route between adjacent stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub distance: u32,
    pub surcharge: u32,
}

/// A shortest route between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    stations: Vec<StationId>,
    distance: u64,
    hops: Vec<Hop>,
}

impl Route {
    /// Stations from origin to destination, both included.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn origin(&self) -> StationId {
        self.stations[0]
    }

    pub fn destination(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Total distance of the route.
    pub fn distance(&self) -> u64 {
        self.distance
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Lines ridden, in path order, without consecutive repeats.
    ///
    /// A line can appear twice if the route leaves it and later returns.
    pub fn line_ids(&self) -> Vec<LineId> {
        let mut lines: Vec<LineId> = self.hops.iter().map(|h| h.line).collect();
        lines.dedup();
        lines
    }

    /// Number of times the route changes line.
    pub fn transfers(&self) -> usize {
        self.line_ids().len().saturating_sub(1)
    }

    /// Highest surcharge among the lines ridden.
    pub fn max_surcharge(&self) -> u32 {
        self.hops.iter().map(|h| h.surcharge).max().unwrap_or(0)
    }
}

/// Cost of reaching a node: (distance, hops).
type Cost = (u64, u32);

fn add(a: Cost, b: Cost) -> Cost {
    (a.0 + b.0, a.1 + b.1)
}

/// Single-source Dijkstra returning the best cost to every node.
fn costs_from(graph: &Graph, source: usize) -> Vec<Option<Cost>> {
    let mut best: Vec<Option<Cost>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::new();

    best[source] = Some((0, 0));
    heap.push(Reverse(((0u64, 0u32), source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if best[node].is_some_and(|b| b < cost) {
            continue;
        }

        for edge in graph.neighbours(node) {
            let next = add(cost, (u64::from(edge.distance), 1));
            if best[edge.to].is_none_or(|b| next < b) {
                best[edge.to] = Some(next);
                heap.push(Reverse((next, edge.to)));
            }
        }
    }

    best
}

/// Find the shortest route between two stations.
///
/// Ties on distance go to the route with fewer hops, then to the route
/// whose station id sequence is lexicographically smallest, so identical
/// graphs always produce identical routes.
pub fn shortest_path(
    graph: &Graph,
    origin: StationId,
    destination: StationId,
) -> Result<Route, PathError> {
    if origin == destination {
        return Err(PathError::SameStation(origin));
    }
    let source = graph
        .index_of(origin)
        .ok_or(PathError::StationNotFound(origin))?;
    let target = graph
        .index_of(destination)
        .ok_or(PathError::StationNotFound(destination))?;

    let no_path = PathError::NoPath {
        from: origin,
        to: destination,
    };

    let forward = costs_from(graph, source);
    let total = forward[target].ok_or_else(|| no_path.clone())?;
    let backward = costs_from(graph, target);

    let on_optimal_route = |node: usize| match (forward[node], backward[node]) {
        (Some(f), Some(b)) => add(f, b) == total,
        _ => false,
    };

    let mut stations = vec![origin];
    let mut hops = Vec::with_capacity(total.1 as usize);
    let mut current = source;
    let mut cost: Cost = (0, 0);

    while current != target {
        // Neighbours are sorted by station id, so the first match is the smallest.
        let edge = graph
            .neighbours(current)
            .iter()
            .find(|e| {
                let reached = add(cost, (u64::from(e.distance), 1));
                forward[e.to] == Some(reached) && on_optimal_route(e.to)
            })
            .ok_or_else(|| no_path.clone())?;

        let from = graph.station_at(current);
        let to = graph.station_at(edge.to);
        hops.push(Hop {
            from,
            to,
            line: edge.line,
            distance: edge.distance,
            surcharge: edge.surcharge,
        });
        stations.push(to);
        cost = add(cost, (u64::from(edge.distance), 1));
        current = edge.to;
    }

    trace!(
        origin = %origin,
        destination = %destination,
        distance = total.0,
        hops = total.1,
        "Found shortest path"
    );

    Ok(Route {
        stations,
        distance: total.0,
        hops,
    })
}
