//! Caching layer for built station graphs.
//!
//! Building the graph touches every line and section, so it is done once per
//! catalog version and shared between queries. The cache is keyed by the
//! catalog version: after any mutation the version changes and the old graph
//! can no longer be returned, even before it is evicted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::TopologyError;
use crate::network::Graph;

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of graph versions kept.
    pub max_capacity: u64,

    /// Optional TTL for cached graphs.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 4,
            ttl: None,
        }
    }
}

/// Cache of built graphs, keyed by catalog version.
pub struct GraphCache {
    graphs: MokaCache<u64, Arc<Graph>>,
}

impl GraphCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            graphs: builder.build(),
        }
    }

    /// Get the graph for `version`, building it on a miss.
    ///
    /// Concurrent misses for the same version share one build. A failed
    /// build is returned to every waiter and not cached.
    pub async fn get_or_build<F>(&self, version: u64, build: F) -> Result<Arc<Graph>, TopologyError>
    where
        F: Future<Output = Result<Graph, TopologyError>>,
    {
        self.graphs
            .try_get_with(version, async {
                debug!(version, "Graph cache miss, building");
                build.await.map(Arc::new)
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Invalidate all cached graphs.
    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StationId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.max_capacity, 4);
        assert_eq!(config.ttl, None);
    }

    #[tokio::test]
    async fn builds_once_per_version() {
        let cache = GraphCache::new(&CacheConfig::default());
        let builds = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_build(1, async {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(Graph::default())
                })
                .await
                .unwrap();
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        cache
            .get_or_build(2, async {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(Graph::default())
            })
            .await
            .unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_build_not_cached() {
        let cache = GraphCache::new(&CacheConfig::default());
        let err = TopologyError::UnknownStation {
            line: LineId::new(1).unwrap(),
            station: StationId::new(9).unwrap(),
        };

        let result = cache.get_or_build(1, async { Err(err.clone()) }).await;
        assert_eq!(result.unwrap_err(), err);
        assert!(cache.graphs.get(&1).await.is_none());

        let graph = cache.get_or_build(1, async { Ok(Graph::default()) }).await;
        assert!(graph.is_ok());
    }

    #[tokio::test]
    async fn invalidate_all_forces_rebuild() {
        let cache = GraphCache::new(&CacheConfig::default());
        cache
            .get_or_build(1, async { Ok(Graph::default()) })
            .await
            .unwrap();
        assert!(cache.graphs.get(&1).await.is_some());

        cache.invalidate_all();
        assert!(cache.graphs.get(&1).await.is_none());
    }
}
