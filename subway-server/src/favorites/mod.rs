//! Members' favorite stations and origin-destination paths.

mod error;
mod store;

pub use error::FavoriteError;
pub use store::{FavoriteId, FavoritePath, FavoriteStation, FavoriteStore, MemberId};
