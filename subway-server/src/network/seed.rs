//! Loading a network from a JSON seed file.
//!
//! The file lists stations and lines with explicit ids:
//!
//! ```json
//! {
//!   "stations": [{ "id": 1, "name": "Gangnam" }, { "id": 2, "name": "Yangjae" }],
//!   "lines": [{
//!     "id": 1, "name": "Shinbundang", "surcharge": 900,
//!     "sections": [{ "up": 1, "down": 2, "distance": 10 }]
//!   }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::{InvalidId, Line, LineId, Section, Station, StationId, TopologyError};

use super::graph::Graph;
use super::store::{CatalogError, NetworkStore};

/// Errors loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("seed network is not buildable: {0}")]
    Topology(#[from] TopologyError),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    stations: Vec<SeedStation>,
    #[serde(default)]
    lines: Vec<SeedLine>,
}

#[derive(Debug, Deserialize)]
struct SeedStation {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeedLine {
    id: u64,
    name: String,
    #[serde(default)]
    surcharge: u32,
    #[serde(default)]
    sections: Vec<SeedSection>,
}

#[derive(Debug, Deserialize)]
struct SeedSection {
    up: u64,
    down: u64,
    distance: u32,
}

/// Parse a seed document into a populated store.
pub fn parse_network(json: &str) -> Result<NetworkStore, SeedError> {
    let seed: SeedFile = serde_json::from_str(json)?;

    let stations = seed
        .stations
        .into_iter()
        .map(|s| -> Result<Station, SeedError> {
            Ok(Station::new(StationId::new(s.id)?, s.name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut lines = Vec::with_capacity(seed.lines.len());
    for l in seed.lines {
        let mut line = Line::new(LineId::new(l.id)?, l.name, l.surcharge);
        for s in l.sections {
            line = line.with_section(Section::new(
                StationId::new(s.up)?,
                StationId::new(s.down)?,
                s.distance,
            ));
        }
        lines.push(line);
    }

    let graph = Graph::build(&stations, &lines)?;
    let line_count = lines.len();
    let store = NetworkStore::with_network(stations, lines)?;

    info!(
        stations = graph.node_count(),
        edges = graph.edge_count(),
        lines = line_count,
        "Loaded network seed"
    );
    Ok(store)
}

/// Read and parse a seed file from disk.
pub fn load_network(path: &Path) -> Result<NetworkStore, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_network(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SEED: &str = r#"{
        "stations": [
            { "id": 1, "name": "Gangnam" },
            { "id": 2, "name": "Yangjae" },
            { "id": 3, "name": "Gyodae" }
        ],
        "lines": [
            {
                "id": 1, "name": "Shinbundang", "surcharge": 900,
                "sections": [{ "up": 1, "down": 2, "distance": 10 }]
            },
            {
                "id": 2, "name": "Line 2",
                "sections": [{ "up": 3, "down": 1, "distance": 4 }]
            }
        ]
    }"#;

    #[tokio::test]
    async fn parses_stations_and_lines() {
        let store = parse_network(SEED).unwrap();

        let stations = store.stations().await;
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].name, "Gangnam");

        let lines = store.lines().await;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].surcharge, 900);
        assert_eq!(lines[1].surcharge, 0);
        assert_eq!(lines[1].sections[0].distance, 4);
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SEED).unwrap();

        let store = load_network(&path).unwrap();
        assert_eq!(store.stations().await.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_network(Path::new("/nonexistent/network.json"))
            .err()
            .unwrap();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn zero_id_rejected() {
        let err = parse_network(r#"{ "stations": [{ "id": 0, "name": "X" }] }"#)
            .err()
            .unwrap();
        assert!(matches!(err, SeedError::InvalidId(_)));
    }

    #[test]
    fn duplicate_names_rejected() {
        let json = r#"{ "stations": [{ "id": 1, "name": "X" }, { "id": 2, "name": "X" }] }"#;
        let err = parse_network(json).err().unwrap();
        assert!(matches!(
            err,
            SeedError::Catalog(CatalogError::DuplicateStationName(_))
        ));
    }

    #[test]
    fn dangling_station_reference_rejected() {
        let json = r#"{
            "stations": [{ "id": 1, "name": "A" }],
            "lines": [{ "id": 1, "name": "L", "sections": [{ "up": 1, "down": 7, "distance": 3 }] }]
        }"#;
        let err = parse_network(json).err().unwrap();
        assert!(matches!(
            err,
            SeedError::Topology(TopologyError::UnknownStation { .. })
        ));
    }

    #[test]
    fn zero_distance_section_rejected() {
        let json = r#"{
            "stations": [{ "id": 1, "name": "A" }, { "id": 2, "name": "B" }],
            "lines": [{ "id": 1, "name": "L", "sections": [{ "up": 1, "down": 2, "distance": 0 }] }]
        }"#;
        let err = parse_network(json).err().unwrap();
        assert!(matches!(
            err,
            SeedError::Topology(TopologyError::NonPositiveDistance { .. })
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = parse_network("{ not json").err().unwrap();
        assert!(matches!(err, SeedError::Json(_)));
    }
}
