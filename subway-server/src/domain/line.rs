//! Rail lines and their sections.

use std::fmt;
use std::num::NonZeroU64;

use serde::Serialize;

use super::station::{InvalidId, StationId};

/// Identifier of a rail line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineId(NonZeroU64);

impl LineId {
    /// Create a line id. Zero is rejected.
    pub fn new(raw: u64) -> Result<Self, InvalidId> {
        NonZeroU64::new(raw).map(LineId).ok_or(InvalidId {
            kind: "line",
            reason: "must be positive",
        })
    }

    /// The lowest valid id.
    pub(crate) const FIRST: Self = LineId(NonZeroU64::MIN);

    /// The id after this one, if any.
    pub(crate) fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(LineId)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One edge of a line between two adjacent stations.
///
/// Sections are not validated on construction; the graph builder rejects
/// zero distances, self-loops and unknown stations for the whole network at
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub up: StationId,
    pub down: StationId,
    pub distance: u32,
}

impl Section {
    pub fn new(up: StationId, down: StationId, distance: u32) -> Self {
        Self { up, down, distance }
    }
}

/// A named rail line with its fare surcharge.
///
/// Sections are kept in insertion order and do not have to form a single
/// chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    /// Extra fare charged when a route rides this line.
    pub surcharge: u32,
    pub sections: Vec<Section>,
}

impl Line {
    /// Create a line with no sections.
    pub fn new(id: LineId, name: impl Into<String>, surcharge: u32) -> Self {
        Self {
            id,
            name: name.into(),
            surcharge,
            sections: Vec::new(),
        }
    }

    /// Append a section, returning the line for chaining.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}
