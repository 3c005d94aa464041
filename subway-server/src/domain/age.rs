//! Rider age and fare brackets.

use serde::Serialize;

/// Error returned for an age that cannot belong to a rider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid age {0}: must not be negative")]
pub struct InvalidAge(pub i64);

/// Highest age that still counts as a child fare.
const CHILD_MAX: u32 = 12;

/// Highest age that still counts as a teen fare.
const TEEN_MAX: u32 = 18;

/// A validated rider age in whole years.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Age, AgeBracket};
///
/// assert_eq!(Age::new(8).unwrap().bracket(), AgeBracket::Child);
/// assert_eq!(Age::new(15).unwrap().bracket(), AgeBracket::Teen);
/// assert_eq!(Age::new(40).unwrap().bracket(), AgeBracket::Adult);
/// assert!(Age::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u32);

impl Age {
    pub fn new(years: i64) -> Result<Self, InvalidAge> {
        u32::try_from(years).map(Age).map_err(|_| InvalidAge(years))
    }

    /// The fare bracket this age falls into.
    pub fn bracket(self) -> AgeBracket {
        match self.0 {
            0..=CHILD_MAX => AgeBracket::Child,
            13..=TEEN_MAX => AgeBracket::Teen,
            _ => AgeBracket::Adult,
        }
    }
}

/// Fare bracket used for discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBracket {
    Child,
    Teen,
    Adult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries() {
        assert_eq!(Age::new(0).unwrap().bracket(), AgeBracket::Child);
        assert_eq!(Age::new(12).unwrap().bracket(), AgeBracket::Child);
        assert_eq!(Age::new(13).unwrap().bracket(), AgeBracket::Teen);
        assert_eq!(Age::new(18).unwrap().bracket(), AgeBracket::Teen);
        assert_eq!(Age::new(19).unwrap().bracket(), AgeBracket::Adult);
    }

    #[test]
    fn negative_rejected() {
        assert_eq!(Age::new(-3), Err(InvalidAge(-3)));
        assert_eq!(
            InvalidAge(-3).to_string(),
            "invalid age -3: must not be negative"
        );
    }

    #[test]
    fn absurdly_large_rejected() {
        assert!(Age::new(i64::from(u32::MAX) + 1).is_err());
    }
}
