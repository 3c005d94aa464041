//! Domain error types.
//!
//! These errors describe data integrity problems in the station network.
//! They are raised when the graph is built, never at query time.

use super::{LineId, StationId};

/// The line/section catalog cannot be turned into a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A section points at a station that is not registered
    #[error("line {line} has a section referencing unknown station {station}")]
    UnknownStation { line: LineId, station: StationId },

    /// A section has zero length
    #[error("line {line} has a section {up}-{down} with non-positive distance")]
    NonPositiveDistance {
        line: LineId,
        up: StationId,
        down: StationId,
    },

    /// A section starts and ends at the same station
    #[error("line {line} has a section looping on station {station}")]
    SelfLoop { line: LineId, station: StationId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let line = LineId::new(2).unwrap();
        let a = StationId::new(1).unwrap();
        let b = StationId::new(5).unwrap();

        let err = TopologyError::UnknownStation { line, station: b };
        assert_eq!(
            err.to_string(),
            "line 2 has a section referencing unknown station 5"
        );

        let err = TopologyError::NonPositiveDistance { line, up: a, down: b };
        assert_eq!(
            err.to_string(),
            "line 2 has a section 1-5 with non-positive distance"
        );

        let err = TopologyError::SelfLoop { line, station: a };
        assert_eq!(err.to_string(), "line 2 has a section looping on station 1");
    }
}
