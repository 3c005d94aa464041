//! In-memory station registry and line/section catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{Line, LineId, Section, Station, StationId, TopologyError};

/// Errors from catalog mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("station name already registered: {0}")]
    DuplicateStationName(String),

    #[error("line name already registered: {0}")]
    DuplicateLineName(String),

    #[error("station id {0} registered twice")]
    DuplicateStationId(StationId),

    #[error("line id {0} registered twice")]
    DuplicateLineId(LineId),

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// The section would make the network unbuildable
    #[error("invalid section: {0}")]
    InvalidSection(TopologyError),

    #[error("no {0} ids left")]
    IdsExhausted(&'static str),
}

/// A consistent copy of the catalog at one version.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    pub version: u64,
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
}

#[derive(Debug, Default)]
struct Catalog {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    /// Bumped on every successful mutation.
    version: u64,
}

impl Catalog {
    fn next_station_id(&self) -> Result<StationId, CatalogError> {
        match self.stations.keys().next_back() {
            None => Ok(StationId::FIRST),
            Some(id) => id.successor().ok_or(CatalogError::IdsExhausted("station")),
        }
    }

    fn next_line_id(&self) -> Result<LineId, CatalogError> {
        match self.lines.keys().next_back() {
            None => Ok(LineId::FIRST),
            Some(id) => id.successor().ok_or(CatalogError::IdsExhausted("line")),
        }
    }

    /// Same checks the graph builder applies, for one section.
    fn check_section(&self, line: LineId, section: &Section) -> Result<(), TopologyError> {
        if section.up == section.down {
            return Err(TopologyError::SelfLoop {
                line,
                station: section.up,
            });
        }
        if section.distance == 0 {
            return Err(TopologyError::NonPositiveDistance {
                line,
                up: section.up,
                down: section.down,
            });
        }
        for station in [section.up, section.down] {
            if !self.stations.contains_key(&station) {
                return Err(TopologyError::UnknownStation { line, station });
            }
        }
        Ok(())
    }
}

/// Thread-safe station and line store.
///
/// Readers take a snapshot; writers bump the catalog version so cached
/// graphs built from an older version are never reused.
#[derive(Clone, Default)]
pub struct NetworkStore {
    inner: Arc<RwLock<Catalog>>,
}

impl NetworkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with stations and lines.
    ///
    /// Ids are kept as given; duplicates are rejected.
    pub fn with_network(stations: Vec<Station>, lines: Vec<Line>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for station in stations {
            if catalog.stations.values().any(|s| s.name == station.name) {
                return Err(CatalogError::DuplicateStationName(station.name));
            }
            if catalog.stations.contains_key(&station.id) {
                return Err(CatalogError::DuplicateStationId(station.id));
            }
            catalog.stations.insert(station.id, station);
        }

        for line in lines {
            if catalog.lines.values().any(|l| l.name == line.name) {
                return Err(CatalogError::DuplicateLineName(line.name));
            }
            if catalog.lines.contains_key(&line.id) {
                return Err(CatalogError::DuplicateLineId(line.id));
            }
            catalog.lines.insert(line.id, line);
        }

        Ok(Self {
            inner: Arc::new(RwLock::new(catalog)),
        })
    }

    /// Current catalog version.
    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    /// Copy of the whole catalog, taken under one read lock.
    pub async fn snapshot(&self) -> NetworkSnapshot {
        let guard = self.inner.read().await;
        NetworkSnapshot {
            version: guard.version,
            stations: guard.stations.values().cloned().collect(),
            lines: guard.lines.values().cloned().collect(),
        }
    }

    /// All stations, ordered by id.
    pub async fn stations(&self) -> Vec<Station> {
        self.inner.read().await.stations.values().cloned().collect()
    }

    /// Look up a station by id.
    pub async fn station(&self, id: StationId) -> Result<Station, CatalogError> {
        self.inner
            .read()
            .await
            .stations
            .get(&id)
            .cloned()
            .ok_or(CatalogError::StationNotFound(id))
    }

    /// Whether a station is registered.
    pub async fn contains_station(&self, id: StationId) -> bool {
        self.inner.read().await.stations.contains_key(&id)
    }

    /// Look up several stations, preserving order.
    pub async fn stations_by_id(&self, ids: &[StationId]) -> Result<Vec<Station>, CatalogError> {
        let guard = self.inner.read().await;
        ids.iter()
            .map(|id| {
                guard
                    .stations
                    .get(id)
                    .cloned()
                    .ok_or(CatalogError::StationNotFound(*id))
            })
            .collect()
    }

    /// All lines, ordered by id.
    pub async fn lines(&self) -> Vec<Line> {
        self.inner.read().await.lines.values().cloned().collect()
    }

    /// Register a new station under the next free id.
    pub async fn add_station(&self, name: impl Into<String>) -> Result<Station, CatalogError> {
        let name = name.into();
        let mut guard = self.inner.write().await;

        if guard.stations.values().any(|s| s.name == name) {
            return Err(CatalogError::DuplicateStationName(name));
        }

        let station = Station::new(guard.next_station_id()?, name);
        guard.stations.insert(station.id, station.clone());
        guard.version += 1;

        info!(station = %station.id, name = %station.name, version = guard.version, "Added station");
        Ok(station)
    }

    /// Register a new line with no sections.
    pub async fn add_line(
        &self,
        name: impl Into<String>,
        surcharge: u32,
    ) -> Result<Line, CatalogError> {
        let name = name.into();
        let mut guard = self.inner.write().await;

        if guard.lines.values().any(|l| l.name == name) {
            return Err(CatalogError::DuplicateLineName(name));
        }

        let line = Line::new(guard.next_line_id()?, name, surcharge);
        guard.lines.insert(line.id, line.clone());
        guard.version += 1;

        info!(line = %line.id, name = %line.name, surcharge, version = guard.version, "Added line");
        Ok(line)
    }

    /// Append a section to a line.
    ///
    /// The section must join two different registered stations with a
    /// positive distance; a rejected section leaves the catalog untouched.
    pub async fn add_section(&self, line_id: LineId, section: Section) -> Result<Line, CatalogError> {
        let mut guard = self.inner.write().await;

        if !guard.lines.contains_key(&line_id) {
            return Err(CatalogError::LineNotFound(line_id));
        }
        guard
            .check_section(line_id, &section)
            .map_err(CatalogError::InvalidSection)?;

        let line = guard
            .lines
            .get_mut(&line_id)
            .ok_or(CatalogError::LineNotFound(line_id))?;
        line.sections.push(section);
        let line = line.clone();
        guard.version += 1;

        info!(
            line = %line_id,
            up = %section.up,
            down = %section.down,
            distance = section.distance,
            version = guard.version,
            "Added section"
        );
        Ok(line)
    }

    /// Remove a line and all of its sections.
    pub async fn remove_line(&self, line_id: LineId) -> Result<Line, CatalogError> {
        let mut guard = self.inner.write().await;

        let line = guard
            .lines
            .remove(&line_id)
            .ok_or(CatalogError::LineNotFound(line_id))?;
        guard.version += 1;

        info!(line = %line_id, version = guard.version, "Removed line");
        Ok(line)
    }
}
