use std::sync::Arc;

use tracing::{debug, instrument};

use crate::catalog::Catalogs;
use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{
    BillingCadence, BundleRequest, CatalogSummary, ComponentResult, Currency, EstimateRequest,
    EstimateResult, FlatRequest, Profile,
};
use crate::projector::{Projection, project};
use crate::rates::RateTable;
use crate::suggestions::{DEFAULT_REGION, Subject, suggest};

/// Hourly rate applied to services missing from the flat-mode rate table.
pub const DEFAULT_BASE_RATE: f64 = 0.10;

/// Multiplier applied to regions missing from the flat-mode rate table.
pub const DEFAULT_REGION_MODIFIER: f64 = 1.0;

/// Decimal places of flat-mode (currency-facing) figures.
pub const FLAT_PRECISION: i32 = 2;

/// Decimal places of bundle-mode figures.
pub const BUNDLE_PRECISION: i32 = 4;

/// A priced profile before rounding.
#[derive(Debug)]
pub(crate) struct Breakdown<'a> {
    pub profile: &'a Profile,
    pub components: Vec<ComponentResult>,
    /// Unrounded totals
    pub totals: Projection,
}

/// Computes cost estimates against the static catalogs.
///
/// Holds only shared, read-only data; cloning is cheap and any number of
/// requests may run concurrently.
#[derive(Debug, Clone)]
pub struct EstimatorService {
    catalogs: Arc<Catalogs>,
    rates: Arc<RateTable>,
}

impl EstimatorService {
    /// Create an estimator using the built-in flat-mode rate table
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self::with_rates(catalogs, RateTable::builtin())
    }

    pub fn with_rates(catalogs: Arc<Catalogs>, rates: RateTable) -> Self {
        Self {
            catalogs,
            rates: Arc::new(rates),
        }
    }

    /// Estimate the cost of a flat or bundle request
    pub fn estimate(&self, request: &EstimateRequest) -> EstimatorResult<EstimateResult> {
        match request {
            EstimateRequest::Flat(flat) => Ok(self.estimate_flat(flat)),
            EstimateRequest::Bundle(bundle) => self.estimate_bundle(bundle),
        }
    }

    /// Flat mode never fails: unknown services and regions fall back to
    /// [`DEFAULT_BASE_RATE`] and [`DEFAULT_REGION_MODIFIER`].
    ///
    /// The cost is the billing-period (monthly) amount; its weekly share comes
    /// from the projector like every other weekly figure.
    #[instrument(skip(self), fields(region = %request.region, service = %request.service))]
    pub fn estimate_flat(&self, request: &FlatRequest) -> EstimateResult {
        let rate = self.rates.base_rate(&request.service).unwrap_or_else(|| {
            debug!(default = DEFAULT_BASE_RATE, "Unknown service, using default rate");
            DEFAULT_BASE_RATE
        });
        let factor = self
            .rates
            .region_modifier(&request.region)
            .unwrap_or_else(|| {
                debug!(
                    default = DEFAULT_REGION_MODIFIER,
                    "Unknown region, using default modifier"
                );
                DEFAULT_REGION_MODIFIER
            });

        let cost = rate * request.usage_hours * factor;
        let projection = project(cost, 1.0, BillingCadence::Monthly).rounded(FLAT_PRECISION);

        EstimateResult {
            region: request.region.clone(),
            service: Some(request.service.clone()),
            profile: None,
            estimated_cost: Some(projection.monthly),
            weekly_estimate: projection.weekly,
            monthly_estimate: projection.monthly,
            currency: Currency::Usd,
            components: None,
            suggestions: suggest(
                Subject::Service {
                    name: &request.service,
                    usage_hours: request.usage_hours,
                },
                &request.region,
            ),
        }
    }

    /// Bundle mode fails with `NotFound` for an unknown region (checked
    /// first) or profile. A component whose service has no price in the
    /// region is reported with a note and left out of the totals.
    #[instrument(skip(self), fields(region = %request.region, profile = %request.profile))]
    pub fn estimate_bundle(&self, request: &BundleRequest) -> EstimatorResult<EstimateResult> {
        let breakdown = self.bundle_breakdown(&request.region, &request.profile)?;
        let totals = breakdown.totals.rounded(BUNDLE_PRECISION);

        Ok(EstimateResult {
            region: request.region.clone(),
            service: None,
            profile: Some(request.profile.clone()),
            estimated_cost: None,
            weekly_estimate: totals.weekly,
            monthly_estimate: totals.monthly,
            currency: Currency::Usd,
            components: Some(breakdown.components),
            suggestions: suggest(Subject::Profile(breakdown.profile), &request.region),
        })
    }

    /// Resolves the region and profile, then prices every component.
    ///
    /// Only monthly amounts are accumulated; the weekly total is derived from
    /// the monthly total so per-component rounding never compounds.
    pub(crate) fn bundle_breakdown<'a>(
        &'a self,
        region: &str,
        profile_name: &str,
    ) -> EstimatorResult<Breakdown<'a>> {
        if !self.catalogs.pricing.has_region(region) {
            return Err(EstimatorError::unknown_region(region));
        }
        let profile = self
            .catalogs
            .profiles
            .lookup(profile_name)
            .ok_or_else(|| EstimatorError::unknown_profile(profile_name))?;

        let mut monthly_total = 0.0;
        let mut components = Vec::with_capacity(profile.components.len());

        for component in &profile.components {
            let result = match self.catalogs.pricing.lookup(region, &component.service) {
                Some(unit_price) => {
                    let projection =
                        project(unit_price, component.units, component.billing_cadence);
                    monthly_total += projection.monthly;
                    let projection = projection.rounded(BUNDLE_PRECISION);

                    ComponentResult {
                        service: component.service.clone(),
                        units: component.units,
                        billing_cadence: component.billing_cadence,
                        monthly: Some(projection.monthly),
                        weekly: Some(projection.weekly),
                        note: None,
                    }
                }
                None => {
                    debug!(service = %component.service, "No price in region, skipping component");

                    ComponentResult {
                        service: component.service.clone(),
                        units: component.units,
                        billing_cadence: component.billing_cadence,
                        monthly: None,
                        weekly: None,
                        note: Some(format!(
                            "No price available for {} in {}",
                            component.service, region
                        )),
                    }
                }
            };
            components.push(result);
        }

        Ok(Breakdown {
            profile,
            components,
            totals: Projection::from_monthly(monthly_total),
        })
    }

    /// Everything a client can choose from
    pub fn catalog_summary(&self) -> CatalogSummary {
        CatalogSummary {
            default_region: DEFAULT_REGION.to_string(),
            regions: self.catalogs.pricing.regions().map(str::to_string).collect(),
            services: self
                .catalogs
                .pricing
                .services()
                .into_iter()
                .map(str::to_string)
                .collect(),
            profiles: self.catalogs.profiles.summaries(),
            flat_services: self.rates.services().map(str::to_string).collect(),
            flat_regions: self.rates.regions().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PricingCatalog, ProfileCatalog};
    use crate::models::Component;
    use crate::projector::{round_to, weekly_from_monthly};
    use std::collections::BTreeMap;

    fn component(service: &str, units: f64, billing_cadence: BillingCadence) -> Component {
        Component {
            service: service.to_string(),
            units,
            billing_cadence,
        }
    }

    fn service() -> EstimatorService {
        let pricing = PricingCatalog::new(BTreeMap::from([
            (
                "us-east-1".to_string(),
                BTreeMap::from([
                    ("EC2".to_string(), 0.05),
                    ("S3".to_string(), 0.023),
                    ("RDS".to_string(), 0.171),
                ]),
            ),
            (
                "eu-central-1".to_string(),
                BTreeMap::from([("EC2".to_string(), 0.06)]),
            ),
        ]))
        .unwrap();

        let profiles = ProfileCatalog::new(BTreeMap::from([
            (
                "pair".to_string(),
                Profile {
                    description: None,
                    components: vec![component("EC2", 2.0, BillingCadence::Hourly)],
                },
            ),
            (
                "web-app".to_string(),
                Profile {
                    description: Some("App servers, storage and a database".to_string()),
                    components: vec![
                        component("EC2", 2.0, BillingCadence::Hourly),
                        component("S3", 100.0, BillingCadence::Monthly),
                        component("RDS", 1.0, BillingCadence::Hourly),
                    ],
                },
            ),
            ("empty".to_string(), Profile::default()),
        ]))
        .unwrap();

        EstimatorService::new(Arc::new(Catalogs::new(pricing, profiles)))
    }

    fn flat(region: &str, service_name: &str, usage_hours: f64) -> EstimateResult {
        service()
            .estimate(&EstimateRequest::Flat(FlatRequest {
                region: region.to_string(),
                service: service_name.to_string(),
                usage_hours,
            }))
            .unwrap()
    }

    fn bundle(region: &str, profile: &str) -> EstimatorResult<EstimateResult> {
        service().estimate(&EstimateRequest::Bundle(BundleRequest {
            region: region.to_string(),
            profile: profile.to_string(),
            traffic: None,
        }))
    }

    #[test]
    fn test_flat_known_service_and_region() {
        let result = flat("eu-central-1", "EC2", 100.0);
        assert_eq!(result.estimated_cost, Some(14.4));
        assert_eq!(result.monthly_estimate, 14.4);
        assert_eq!(result.weekly_estimate, 3.36);
        assert_eq!(result.service.as_deref(), Some("EC2"));
        assert!(result.components.is_none());
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_flat_matches_rate_times_hours_times_modifier() {
        let rates = RateTable::builtin();
        for region in ["us-east-1", "us-west-1", "ap-south-1", "eu-central-1"] {
            for service_name in ["EC2", "S3", "Lambda", "RDS"] {
                let expected = round_to(
                    rates.base_rate(service_name).unwrap()
                        * 730.0
                        * rates.region_modifier(region).unwrap(),
                    FLAT_PRECISION,
                );
                let result = flat(region, service_name, 730.0);
                assert_eq!(result.estimated_cost, Some(expected), "{service_name} {region}");
            }
        }
    }

    #[test]
    fn test_flat_unknown_service_uses_default_rate() {
        let result = flat("us-east-1", "DynamoDB", 50.0);
        assert_eq!(result.estimated_cost, Some(5.0));
    }

    #[test]
    fn test_flat_unknown_region_uses_default_modifier() {
        let result = flat("sa-east-1", "EC2", 10.0);
        assert_eq!(result.estimated_cost, Some(1.2));
    }

    #[test]
    fn test_flat_largest_accepted_usage_stays_finite() {
        let result = flat("eu-central-1", "RDS", 1e9);
        assert_eq!(result.estimated_cost, Some(300_000_000.0));
        assert!(result.weekly_estimate.is_finite());
    }

    #[test]
    fn test_flat_zero_usage_costs_nothing() {
        let result = flat("us-east-1", "RDS", 0.0);
        assert_eq!(result.estimated_cost, Some(0.0));
        assert_eq!(result.weekly_estimate, 0.0);
    }

    #[test]
    fn test_bundle_hourly_component() {
        let result = bundle("us-east-1", "pair").unwrap();
        assert_eq!(result.monthly_estimate, 72.0);
        assert_eq!(result.weekly_estimate, 16.8);

        let components = result.components.unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].monthly, Some(72.0));
        assert_eq!(components[0].weekly, Some(16.8));
        assert_eq!(components[0].units, 2.0);
    }

    #[test]
    fn test_bundle_unpriced_component_gets_note_and_no_cost() {
        let result = bundle("eu-central-1", "web-app").unwrap();
        let components = result.components.unwrap();

        assert_eq!(components.len(), 3);
        assert!(components[0].is_priced());
        assert!(!components[1].is_priced());
        assert!(!components[2].is_priced());
        assert!(components[1].note.as_deref().unwrap().contains("S3"));
        assert_eq!(components[1].monthly, None);

        // Only the two EC2 units at 0.06/h count.
        assert_eq!(result.monthly_estimate, 86.4);
        assert_eq!(result.weekly_estimate, 20.16);
    }

    #[test]
    fn test_bundle_weekly_total_is_derived_from_monthly_total() {
        let service = service();
        for (region, profile) in [
            ("us-east-1", "web-app"),
            ("us-east-1", "pair"),
            ("eu-central-1", "web-app"),
            ("us-east-1", "empty"),
        ] {
            let totals = service.bundle_breakdown(region, profile).unwrap().totals;
            assert!((totals.weekly - weekly_from_monthly(totals.monthly)).abs() < 1e-9);

            let result = bundle(region, profile).unwrap();
            assert!(
                (result.weekly_estimate - weekly_from_monthly(result.monthly_estimate)).abs()
                    < 1e-4
            );
        }
    }

    #[test]
    fn test_bundle_totals_sum_component_monthly_costs() {
        let result = bundle("us-east-1", "web-app").unwrap();
        // 0.05 * 720 * 2 + 0.023 * 100 + 0.171 * 720
        assert_eq!(result.monthly_estimate, 197.42);
        assert_eq!(result.profile.as_deref(), Some("web-app"));
        assert_eq!(result.estimated_cost, None);
    }

    #[test]
    fn test_bundle_empty_profile() {
        let result = bundle("us-east-1", "empty").unwrap();
        assert_eq!(result.monthly_estimate, 0.0);
        assert_eq!(result.weekly_estimate, 0.0);
        assert_eq!(result.components, Some(vec![]));
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_bundle_unknown_region_is_not_found() {
        let err = bundle("mars-1", "web-app").unwrap_err();
        assert!(matches!(
            &err,
            EstimatorError::NotFound { key, .. } if key == "mars-1"
        ));
    }

    #[test]
    fn test_bundle_unknown_profile_is_not_found() {
        let err = bundle("us-east-1", "giant").unwrap_err();
        assert_eq!(err.to_string(), "Unknown profile: 'giant'");
    }

    #[test]
    fn test_bundle_breakdown_resolves_profile_once() {
        let service = service();
        let breakdown = service.bundle_breakdown("us-east-1", "web-app").unwrap();
        assert_eq!(breakdown.profile.components.len(), 3);
        assert_eq!(breakdown.components.len(), 3);
        assert!(matches!(
            service.bundle_breakdown("us-east-1", "giant"),
            Err(EstimatorError::NotFound { kind: crate::error::CatalogKind::Profile, .. })
        ));
    }

    #[test]
    fn test_bundle_region_is_checked_before_profile() {
        let err = bundle("mars-1", "giant").unwrap_err();
        assert_eq!(err.to_string(), "Unknown region: 'mars-1'");
    }

    #[test]
    fn test_catalog_summary() {
        let summary = service().catalog_summary();
        assert_eq!(summary.default_region, "us-east-1");
        assert_eq!(summary.regions, vec!["eu-central-1", "us-east-1"]);
        assert_eq!(summary.services, vec!["EC2", "RDS", "S3"]);
        assert_eq!(summary.profiles.len(), 3);
        assert_eq!(summary.flat_services, vec!["EC2", "Lambda", "RDS", "S3"]);
    }
}
