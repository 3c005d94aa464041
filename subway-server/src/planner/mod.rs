//! Route planning over the station graph.
//!
//! The path finder picks the shortest route between two stations with a
//! deterministic tie-break, the fare policy prices it for a rider's age
//! bracket, and the query service ties both to the cached graph of the
//! current catalog.

mod config;
mod fare;
mod path;
mod service;

pub use config::{DistanceBand, FareConfig};
pub use fare::{FarePolicy, FareQuote};
pub use path::{Hop, PathError, Route, shortest_path};
pub use service::{PathQueryService, RouteError, RoutePlan};
