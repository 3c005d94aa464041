//! Fare configuration.

/// Extra charge applied to the part of a route beyond `above`.
///
/// The band ends where the next band starts. Each started `unit` of
/// distance inside the band costs `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceBand {
    pub above: u64,
    pub unit: u64,
    pub rate: u64,
}

impl DistanceBand {
    pub fn new(above: u64, unit: u64, rate: u64) -> Self {
        Self { above, unit, rate }
    }
}

/// Configuration parameters for fare calculation.
#[derive(Debug, Clone)]
pub struct FareConfig {
    /// Fare for any route up to the first band.
    pub base_fare: u64,

    /// Distance bands, in any order.
    pub bands: Vec<DistanceBand>,

    /// Amount exempt from age discounts.
    pub discount_deduction: u64,

    /// Percentage off for child riders, after the deduction.
    pub child_discount_percent: u64,

    /// Percentage off for teen riders, after the deduction.
    pub teen_discount_percent: u64,

    /// No quote is ever lower than this.
    pub minimum_fare: u64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 1250,
            bands: vec![DistanceBand::new(10, 5, 100), DistanceBand::new(50, 8, 100)],
            discount_deduction: 350,
            child_discount_percent: 50,
            teen_discount_percent: 20,
            minimum_fare: 0,
        }
    }
}
