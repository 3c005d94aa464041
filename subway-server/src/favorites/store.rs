//! Per-member favorite stations and paths.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::StationId;
use crate::network::NetworkStore;

use super::error::FavoriteError;

/// Id of an authenticated member.
pub type MemberId = u64;

/// Id shared by favorite stations and favorite paths.
pub type FavoriteId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteStation {
    pub id: FavoriteId,
    pub member: MemberId,
    pub station: StationId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePath {
    pub id: FavoriteId,
    pub member: MemberId,
    pub source: StationId,
    pub target: StationId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Favorites {
    stations: BTreeMap<FavoriteId, FavoriteStation>,
    paths: BTreeMap<FavoriteId, FavoritePath>,
    last_id: FavoriteId,
}

impl Favorites {
    fn next_id(&mut self) -> FavoriteId {
        self.last_id += 1;
        self.last_id
    }
}

/// Thread-safe favorites store.
///
/// Station references are checked against the network store when a
/// favorite is saved.
#[derive(Clone)]
pub struct FavoriteStore {
    inner: Arc<RwLock<Favorites>>,
    network: NetworkStore,
}

impl FavoriteStore {
    pub fn new(network: NetworkStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Favorites::default())),
            network,
        }
    }

    async fn require_station(&self, id: StationId) -> Result<(), FavoriteError> {
        if self.network.contains_station(id).await {
            Ok(())
        } else {
            Err(FavoriteError::StationNotFound(id))
        }
    }

    /// Save a station as a member's favorite.
    pub async fn save_station(
        &self,
        member: MemberId,
        station: StationId,
    ) -> Result<FavoriteStation, FavoriteError> {
        self.require_station(station).await?;

        let mut guard = self.inner.write().await;
        if guard
            .stations
            .values()
            .any(|f| f.member == member && f.station == station)
        {
            return Err(FavoriteError::AlreadySaved);
        }

        let favorite = FavoriteStation {
            id: guard.next_id(),
            member,
            station,
            created_at: Utc::now(),
        };
        guard.stations.insert(favorite.id, favorite.clone());

        info!(member, favorite = favorite.id, station = %station, "Saved favorite station");
        Ok(favorite)
    }

    /// A member's favorite stations, oldest first.
    pub async fn stations_of(&self, member: MemberId) -> Vec<FavoriteStation> {
        let guard = self.inner.read().await;
        guard
            .stations
            .values()
            .filter(|f| f.member == member)
            .cloned()
            .collect()
    }

    /// Delete one of a member's favorite stations.
    pub async fn delete_station(
        &self,
        member: MemberId,
        id: FavoriteId,
    ) -> Result<(), FavoriteError> {
        let mut guard = self.inner.write().await;
        let favorite = guard.stations.get(&id).ok_or(FavoriteError::NotFound(id))?;
        if favorite.member != member {
            return Err(FavoriteError::NotOwner { favorite: id, member });
        }
        guard.stations.remove(&id);

        info!(member, favorite = id, "Deleted favorite station");
        Ok(())
    }

    /// Save an origin-destination pair as a member's favorite.
    pub async fn save_path(
        &self,
        member: MemberId,
        source: StationId,
        target: StationId,
    ) -> Result<FavoritePath, FavoriteError> {
        if source == target {
            return Err(FavoriteError::SameStation(source));
        }
        self.require_station(source).await?;
        self.require_station(target).await?;

        let mut guard = self.inner.write().await;
        if guard
            .paths
            .values()
            .any(|f| f.member == member && f.source == source && f.target == target)
        {
            return Err(FavoriteError::AlreadySaved);
        }

        let favorite = FavoritePath {
            id: guard.next_id(),
            member,
            source,
            target,
            created_at: Utc::now(),
        };
        guard.paths.insert(favorite.id, favorite.clone());

        info!(
            member,
            favorite = favorite.id,
            source = %source,
            target = %target,
            "Saved favorite path"
        );
        Ok(favorite)
    }

    /// A member's favorite paths, oldest first.
    pub async fn paths_of(&self, member: MemberId) -> Vec<FavoritePath> {
        let guard = self.inner.read().await;
        guard
            .paths
            .values()
            .filter(|f| f.member == member)
            .cloned()
            .collect()
    }

    /// Delete one of a member's favorite paths.
    pub async fn delete_path(&self, member: MemberId, id: FavoriteId) -> Result<(), FavoriteError> {
        let mut guard = self.inner.write().await;
        let favorite = guard.paths.get(&id).ok_or(FavoriteError::NotFound(id))?;
        if favorite.member != member {
            return Err(FavoriteError::NotOwner { favorite: id, member });
        }
        guard.paths.remove(&id);

        info!(member, favorite = id, "Deleted favorite path");
        Ok(())
    }
}
