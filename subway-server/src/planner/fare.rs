//! Fare calculation for a route.
//!
//! A fare is the base fare, plus a charge for each distance band the route
//! reaches into, plus the surcharge of the most expensive line ridden.
//! Child and teen riders then get a percentage off everything above a fixed
//! deduction.

use serde::Serialize;

use crate::domain::AgeBracket;

use super::config::{DistanceBand, FareConfig};
use super::path::Route;

/// Priced breakdown for one route and rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FareQuote {
    pub bracket: AgeBracket,
    pub base_fare: u64,
    pub distance_fare: u64,
    pub line_surcharge: u64,
    pub discount: u64,
    /// What the rider pays.
    pub fare: u64,
}

/// Fare calculator built from a [`FareConfig`].
#[derive(Debug, Clone)]
pub struct FarePolicy {
    config: FareConfig,
}

impl FarePolicy {
    /// Create a policy. Bands are sorted by start distance and a zero unit is
    /// treated as one.
    pub fn new(mut config: FareConfig) -> Self {
        config.bands.sort_by_key(|b| b.above);
        for band in &mut config.bands {
            band.unit = band.unit.max(1);
        }
        config.child_discount_percent = config.child_discount_percent.min(100);
        config.teen_discount_percent = config.teen_discount_percent.min(100);
        Self { config }
    }

    /// Charge for distance beyond the base fare.
    pub fn distance_fare(&self, distance: u64) -> u64 {
        let bands = &self.config.bands;
        bands
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let end = bands.get(i + 1).map_or(u64::MAX, |next| next.above);
                band_charge(band, end, distance)
            })
            .sum()
    }

    /// Price a route for a rider.
    pub fn quote(&self, route: &Route, bracket: AgeBracket) -> FareQuote {
        self.quote_distance(route.distance(), u64::from(route.max_surcharge()), bracket)
    }

    /// Price a distance and line surcharge directly.
    pub fn quote_distance(&self, distance: u64, line_surcharge: u64, bracket: AgeBracket) -> FareQuote {
        let base_fare = self.config.base_fare;
        let distance_fare = self.distance_fare(distance);
        let subtotal = base_fare + distance_fare + line_surcharge;

        let percent = match bracket {
            AgeBracket::Child => self.config.child_discount_percent,
            AgeBracket::Teen => self.config.teen_discount_percent,
            AgeBracket::Adult => 0,
        };
        let discount = subtotal.saturating_sub(self.config.discount_deduction) * percent / 100;
        let fare = (subtotal - discount).max(self.config.minimum_fare);

        FareQuote {
            bracket,
            base_fare,
            distance_fare,
            line_surcharge,
            discount,
            fare,
        }
    }
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self::new(FareConfig::default())
    }
}

/// Charge for the part of `distance` that falls in `[band.above, end)`.
fn band_charge(band: &DistanceBand, end: u64, distance: u64) -> u64 {
    if distance <= band.above {
        return 0;
    }
    let covered = distance.min(end) - band.above;
    covered.div_ceil(band.unit) * band.rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult(policy: &FarePolicy, distance: u64) -> u64 {
        policy.quote_distance(distance, 0, AgeBracket::Adult).fare
    }

    #[test]
    fn base_fare_up_to_ten() {
        let policy = FarePolicy::default();
        assert_eq!(adult(&policy, 1), 1250);
        assert_eq!(adult(&policy, 7), 1250);
        assert_eq!(adult(&policy, 10), 1250);
    }

    #[test]
    fn first_band_charges_per_started_five() {
        let policy = FarePolicy::default();
        assert_eq!(adult(&policy, 11), 1350);
        assert_eq!(adult(&policy, 15), 1350);
        assert_eq!(adult(&policy, 16), 1450);
        assert_eq!(adult(&policy, 50), 2050);
    }

    #[test]
    fn second_band_charges_per_started_eight() {
        let policy = FarePolicy::default();
        assert_eq!(adult(&policy, 51), 2150);
        assert_eq!(adult(&policy, 58), 2150);
        assert_eq!(adult(&policy, 59), 2250);
    }

    #[test]
    fn line_surcharge_added() {
        let policy = FarePolicy::default();
        let quote = policy.quote_distance(7, 900, AgeBracket::Adult);
        assert_eq!(quote.line_surcharge, 900);
        assert_eq!(quote.fare, 2150);
    }

    #[test]
    fn child_and_teen_discounts() {
        let policy = FarePolicy::default();

        // (1250 - 350) * 50% = 450 off
        let child = policy.quote_distance(7, 0, AgeBracket::Child);
        assert_eq!(child.discount, 450);
        assert_eq!(child.fare, 800);

        // (1250 - 350) * 20% = 180 off
        let teen = policy.quote_distance(7, 0, AgeBracket::Teen);
        assert_eq!(teen.discount, 180);
        assert_eq!(teen.fare, 1070);

        let adult = policy.quote_distance(7, 0, AgeBracket::Adult);
        assert_eq!(adult.discount, 0);
        assert_eq!(adult.fare, 1250);
    }

    #[test]
    fn discount_never_goes_negative() {
        let config = FareConfig {
            base_fare: 100,
            ..FareConfig::default()
        };
        let policy = FarePolicy::new(config);
        let quote = policy.quote_distance(5, 0, AgeBracket::Child);
        assert_eq!(quote.discount, 0);
        assert_eq!(quote.fare, 100);
    }

    #[test]
    fn minimum_fare_floor() {
        let config = FareConfig {
            minimum_fare: 1000,
            ..FareConfig::default()
        };
        let policy = FarePolicy::new(config);
        assert_eq!(policy.quote_distance(7, 0, AgeBracket::Child).fare, 1000);
        assert_eq!(policy.quote_distance(7, 0, AgeBracket::Adult).fare, 1250);
    }

    #[test]
    fn unsorted_bands_are_normalised() {
        let config = FareConfig {
            bands: vec![DistanceBand::new(50, 8, 100), DistanceBand::new(10, 0, 100)],
            ..FareConfig::default()
        };
        let policy = FarePolicy::new(config);
        // Zero unit becomes 1: 40 units in the first band
        assert_eq!(policy.distance_fare(50), 4000);
        assert_eq!(policy.config.bands[0].above, 10);
    }

    #[test]
    fn no_bands_means_flat_fare() {
        let config = FareConfig {
            bands: vec![],
            ..FareConfig::default()
        };
        let policy = FarePolicy::new(config);
        assert_eq!(adult(&policy, 1000), 1250);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn bracket_strategy() -> impl Strategy<Value = AgeBracket> {
        prop_oneof![
            Just(AgeBracket::Child),
            Just(AgeBracket::Teen),
            Just(AgeBracket::Adult),
        ]
    }

    proptest! {
        #[test]
        fn fare_monotonic_in_distance(
            d in 1u64..500,
            extra in 0u64..200,
            surcharge in 0u64..2000,
            bracket in bracket_strategy(),
        ) {
            let policy = FarePolicy::default();
            let near = policy.quote_distance(d, surcharge, bracket).fare;
            let far = policy.quote_distance(d + extra, surcharge, bracket).fare;
            prop_assert!(near <= far, "{} km: {}, {} km: {}", d, near, d + extra, far);
        }

        #[test]
        fn child_le_teen_le_adult(d in 1u64..500, surcharge in 0u64..2000) {
            let policy = FarePolicy::default();
            let child = policy.quote_distance(d, surcharge, AgeBracket::Child).fare;
            let teen = policy.quote_distance(d, surcharge, AgeBracket::Teen).fare;
            let adult = policy.quote_distance(d, surcharge, AgeBracket::Adult).fare;
            prop_assert!(child <= teen);
            prop_assert!(teen <= adult);
        }

        #[test]
        fn never_below_minimum(d in 1u64..500, minimum in 0u64..3000, bracket in bracket_strategy()) {
            let config = FareConfig { minimum_fare: minimum, ..FareConfig::default() };
            let policy = FarePolicy::new(config);
            prop_assert!(policy.quote_distance(d, 0, bracket).fare >= minimum);
        }

        #[test]
        fn adult_fare_is_sum_of_parts(d in 1u64..500, surcharge in 0u64..2000) {
            let policy = FarePolicy::default();
            let quote = policy.quote_distance(d, surcharge, AgeBracket::Adult);
            prop_assert_eq!(quote.fare, quote.base_fare + quote.distance_fare + quote.line_surcharge);
        }
    }
}
