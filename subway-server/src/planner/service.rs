//! Path query service: graph cache, path finder and fare policy together.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheConfig, GraphCache};
use crate::domain::{Age, InvalidAge, Line, LineId, Section, Station, StationId, TopologyError};
use crate::network::{CatalogError, Graph, NetworkStore};

use super::fare::{FarePolicy, FareQuote};
use super::path::{PathError, Route, shortest_path};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The catalog cannot be built into a graph
    #[error("invalid network topology: {0}")]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    InvalidAge(#[from] InvalidAge),
}

/// A priced shortest route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub route: Route,
    pub fare: FareQuote,
}

/// Answers route queries against the current catalog.
///
/// Cheap to clone; clones share the store and the graph cache.
#[derive(Clone)]
pub struct PathQueryService {
    store: NetworkStore,
    cache: Arc<GraphCache>,
    fares: Arc<FarePolicy>,
}

impl PathQueryService {
    pub fn new(store: NetworkStore, fares: FarePolicy, cache_config: &CacheConfig) -> Self {
        Self {
            store,
            cache: Arc::new(GraphCache::new(cache_config)),
            fares: Arc::new(fares),
        }
    }

    pub fn store(&self) -> &NetworkStore {
        &self.store
    }

    /// The graph for the current catalog version.
    ///
    /// If the catalog changes between reading the version and taking the
    /// snapshot, the newer graph is stored under the older version. That
    /// entry is never read again because versions only increase.
    pub async fn graph(&self) -> Result<Arc<Graph>, TopologyError> {
        let version = self.store.version().await;
        let store = &self.store;
        self.cache
            .get_or_build(version, async move {
                let snapshot = store.snapshot().await;
                Graph::build(&snapshot.stations, &snapshot.lines).inspect_err(|e| {
                    warn!(version = snapshot.version, error = %e, "Graph build failed");
                })
            })
            .await
    }

    /// Find and price the shortest route for a rider of the given age.
    pub async fn find_route(
        &self,
        origin: StationId,
        destination: StationId,
        age: i64,
    ) -> Result<RoutePlan, RouteError> {
        let age = Age::new(age)?;
        let route = self.find_path(origin, destination).await?;
        let fare = self.fares.quote(&route, age.bracket());

        debug!(
            origin = %route.origin(),
            destination = %route.destination(),
            hops = route.hops().len(),
            distance = route.distance(),
            fare = fare.fare,
            "Route priced"
        );
        Ok(RoutePlan { route, fare })
    }

    /// Find the shortest route without pricing it.
    pub async fn find_path(
        &self,
        origin: StationId,
        destination: StationId,
    ) -> Result<Route, RouteError> {
        let graph = self.graph().await?;
        Ok(shortest_path(&graph, origin, destination)?)
    }

    /// Register a station.
    pub async fn add_station(&self, name: impl Into<String>) -> Result<Station, CatalogError> {
        let station = self.store.add_station(name).await?;
        self.cache.invalidate_all();
        Ok(station)
    }

    /// Register a line.
    pub async fn add_line(&self, name: impl Into<String>, surcharge: u32) -> Result<Line, CatalogError> {
        let line = self.store.add_line(name, surcharge).await?;
        self.cache.invalidate_all();
        Ok(line)
    }

    /// Append a section to a line.
    pub async fn add_section(&self, line: LineId, section: Section) -> Result<Line, CatalogError> {
        let line = self.store.add_section(line, section).await?;
        self.cache.invalidate_all();
        Ok(line)
    }

    /// Remove a line.
    pub async fn remove_line(&self, line: LineId) -> Result<Line, CatalogError> {
        let line = self.store.remove_line(line).await?;
        self.cache.invalidate_all();
        Ok(line)
    }
}
