//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Line, LineId, Station};
use crate::favorites::{FavoriteId, FavoritePath, FavoriteStation};
use crate::planner::{FareQuote, RoutePlan};

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// Station list response.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Station>,
}

/// Request to register a line.
#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    pub name: String,

    /// Extra fare for riding this line (defaults to 0)
    #[serde(default)]
    pub surcharge: u32,
}

/// Line list response.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<Line>,
}

/// Request to append a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: u32,
}

/// Query for a shortest path.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: u64,
    pub target: u64,

    /// Rider age; falls back to the logged-in member, then adult
    pub age: Option<i64>,
}

/// A priced shortest path.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    /// Stations from source to target
    pub stations: Vec<Station>,

    /// Total distance
    pub distance: u64,

    /// Lines ridden, in order
    pub lines: Vec<LineId>,

    /// Number of line changes
    pub transfers: usize,

    /// Final fare
    pub fare: u64,

    /// Fare breakdown
    pub fare_detail: FareQuote,
}

impl PathResponse {
    pub fn new(plan: &RoutePlan, stations: Vec<Station>) -> Self {
        Self {
            stations,
            distance: plan.route.distance(),
            lines: plan.route.line_ids(),
            transfers: plan.route.transfers(),
            fare: plan.fare.fare,
            fare_detail: plan.fare,
        }
    }
}

/// Query for saving a favorite path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePathQuery {
    pub start_id: u64,
    pub end_id: u64,
}

/// A favorite station.
#[derive(Debug, Serialize)]
pub struct FavoriteStationView {
    pub id: FavoriteId,
    pub station: Station,
    pub created_at: DateTime<Utc>,
}

impl FavoriteStationView {
    pub fn new(favorite: &FavoriteStation, station: Station) -> Self {
        Self {
            id: favorite.id,
            station,
            created_at: favorite.created_at,
        }
    }
}

/// Favorite station list response.
#[derive(Debug, Serialize)]
pub struct FavoriteStationsResponse {
    pub favorites: Vec<FavoriteStationView>,
}

/// A favorite path with its current shortest route.
#[derive(Debug, Serialize)]
pub struct FavoritePathView {
    pub id: FavoriteId,
    pub source: Station,
    pub target: Station,

    /// Stations on the shortest route, or null if the network no longer
    /// connects the pair
    pub stations: Option<Vec<Station>>,

    pub created_at: DateTime<Utc>,
}

impl FavoritePathView {
    pub fn new(
        favorite: &FavoritePath,
        source: Station,
        target: Station,
        stations: Option<Vec<Station>>,
    ) -> Self {
        Self {
            id: favorite.id,
            source,
            target,
            stations,
            created_at: favorite.created_at,
        }
    }
}

/// Favorite path list response.
#[derive(Debug, Serialize)]
pub struct FavoritePathsResponse {
    pub favorites: Vec<FavoritePathView>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
