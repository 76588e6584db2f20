//! Built-in flat-mode rate table.

use std::collections::BTreeMap;

/// Hourly base rate per service and price multiplier per region.
///
/// Lookups return `None` for unknown keys; the estimator decides the
/// fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base_rates: BTreeMap<String, f64>,
    region_modifiers: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new(
        base_rates: impl IntoIterator<Item = (String, f64)>,
        region_modifiers: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        Self {
            base_rates: base_rates.into_iter().collect(),
            region_modifiers: region_modifiers.into_iter().collect(),
        }
    }

    /// The rates shipped with the service.
    pub fn builtin() -> Self {
        Self::new(
            [
                ("EC2", 0.12),
                ("S3", 0.023),
                ("Lambda", 0.0000167),
                ("RDS", 0.25),
            ]
            .map(|(service, rate)| (service.to_string(), rate)),
            [
                ("us-east-1", 1.0),
                ("us-west-1", 1.1),
                ("ap-south-1", 0.9),
                ("eu-central-1", 1.2),
            ]
            .map(|(region, factor)| (region.to_string(), factor)),
        )
    }

    pub fn base_rate(&self, service: &str) -> Option<f64> {
        self.base_rates.get(service).copied()
    }

    pub fn region_modifier(&self, region: &str) -> Option<f64> {
        self.region_modifiers.get(region).copied()
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.base_rates.keys().map(String::as_str)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.region_modifiers.keys().map(String::as_str)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::builtin()
    }
}
