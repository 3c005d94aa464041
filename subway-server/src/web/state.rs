//! Application state for the web layer.

use crate::favorites::FavoriteStore;
use crate::planner::PathQueryService;

/// Shared application state.
///
/// Both services are cheap to clone and share their stores.
#[derive(Clone)]
pub struct AppState {
    /// Route queries and catalog mutations
    pub routes: PathQueryService,

    /// Members' favorites
    pub favorites: FavoriteStore,
}

impl AppState {
    /// Create a new app state. Favorites validate against the same network
    /// the route service plans over.
    pub fn new(routes: PathQueryService) -> Self {
        let favorites = FavoriteStore::new(routes.store().clone());
        Self { routes, favorites }
    }
}
