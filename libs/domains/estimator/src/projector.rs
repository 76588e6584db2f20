//! Cost projection.
//!
//! The only place that knows how many hours are in a day, days in a week and
//! days in a billing month. Every weekly figure the service reports is derived
//! here, which keeps `weekly == monthly / 30 * 7` true for all of them.

use crate::models::BillingCadence;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Weekly and monthly cost of one priced line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    pub weekly: f64,
    pub monthly: f64,
}

impl Projection {
    /// Projection whose weekly figure is derived from a monthly amount.
    pub fn from_monthly(monthly: f64) -> Self {
        Self {
            weekly: weekly_from_monthly(monthly),
            monthly,
        }
    }

    pub fn rounded(self, places: i32) -> Self {
        Self {
            weekly: round_to(self.weekly, places),
            monthly: round_to(self.monthly, places),
        }
    }
}

/// Projects a unit price over a week and a month.
///
/// - hourly: `monthly = p * 24 * 30 * u`, `weekly = p * 24 * 7 * u`
/// - monthly: `monthly = p * u`, `weekly = p / 30 * 7 * u`
pub fn project(unit_price: f64, units: f64, cadence: BillingCadence) -> Projection {
    match cadence {
        BillingCadence::Hourly => Projection {
            monthly: unit_price * HOURS_PER_DAY * DAYS_PER_MONTH * units,
            weekly: unit_price * HOURS_PER_DAY * DAYS_PER_WEEK * units,
        },
        BillingCadence::Monthly => Projection {
            monthly: unit_price * units,
            weekly: (unit_price / DAYS_PER_MONTH) * DAYS_PER_WEEK * units,
        },
    }
}

pub fn weekly_from_monthly(monthly: f64) -> f64 {
    monthly / DAYS_PER_MONTH * DAYS_PER_WEEK
}

/// Hours billed in a month for `units` hourly units.
pub fn monthly_hours(units: f64) -> f64 {
    HOURS_PER_DAY * DAYS_PER_MONTH * units
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
