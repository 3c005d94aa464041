//! Domain types for the subway route service.
//!
//! Stations, lines and sections as supplied by the catalog, plus the rider
//! age used for pricing. Identifiers are validated on construction so the
//! graph and fare code can trust them.

mod age;
mod error;
mod line;
mod station;

pub use age::{Age, AgeBracket, InvalidAge};
pub use error::TopologyError;
pub use line::{Line, LineId, Section};
pub use station::{InvalidId, Station, StationId};
