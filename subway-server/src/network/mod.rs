//! The station network: catalog storage and the graph derived from it.

mod graph;
mod seed;
mod store;

pub use graph::{Edge, Graph};
pub use seed::{SeedError, load_network, parse_network};
pub use store::{CatalogError, NetworkSnapshot, NetworkStore};
