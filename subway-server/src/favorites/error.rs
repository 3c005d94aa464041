//! Favorites error types.

use crate::domain::StationId;

use super::store::{FavoriteId, MemberId};

/// Errors saving or deleting favorites.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoriteError {
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// A favorite path cannot start and end at the same station
    #[error("favorite path must connect two different stations, got {0} twice")]
    SameStation(StationId),

    #[error("already saved as a favorite")]
    AlreadySaved,

    #[error("favorite {0} not found")]
    NotFound(FavoriteId),

    #[error("favorite {favorite} does not belong to member {member}")]
    NotOwner {
        favorite: FavoriteId,
        member: MemberId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FavoriteError::NotOwner {
            favorite: 4,
            member: 2,
        };
        assert_eq!(err.to_string(), "favorite 4 does not belong to member 2");

        let err = FavoriteError::SameStation(StationId::new(3).unwrap());
        assert_eq!(
            err.to_string(),
            "favorite path must connect two different stations, got 3 twice"
        );
    }
}
