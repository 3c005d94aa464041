//! Station identity types.

use std::fmt;
use std::num::NonZeroU64;

use serde::Serialize;

/// Error returned when constructing an id from zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    pub(crate) kind: &'static str,
    pub(crate) reason: &'static str,
}

/// Opaque identifier of a registered station.
///
/// Ids are positive integers. Ordering is numeric, which is what the path
/// finder uses to break ties between equally short routes.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationId;
///
/// let id = StationId::new(7).unwrap();
/// assert_eq!(id.get(), 7);
///
/// assert!(StationId::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(NonZeroU64);

impl StationId {
    /// Create a station id. Zero is rejected.
    pub fn new(raw: u64) -> Result<Self, InvalidId> {
        NonZeroU64::new(raw).map(StationId).ok_or(InvalidId {
            kind: "station",
            reason: "must be positive",
        })
    }

    /// The lowest valid id.
    pub(crate) const FIRST: Self = StationId(NonZeroU64::MIN);

    /// The id after this one, if any.
    pub(crate) fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(StationId)
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered station.
///
/// The name is for display only; identity is always the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
