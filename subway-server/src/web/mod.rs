//! Web layer for the subway route service.
//!
//! Provides HTTP endpoints for the station catalog, path queries and
//! members' favorites.

mod auth;
mod dto;
mod routes;
mod state;
pub mod templates;

pub use auth::{AuthError, LoginMember};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
