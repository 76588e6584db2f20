use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// How a component's unit price is billed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BillingCadence {
    /// Unit price is per hour; projected over 24h days.
    Hourly,
    /// Unit price is per 30-day month.
    #[default]
    Monthly,
}

/// Currency enumeration
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
    Hash,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
}

fn default_units() -> f64 {
    1.0
}

/// One priced line of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Service identifier, looked up in the region's price table
    pub service: String,
    /// Number of billed units (instances, GB, ...)
    #[serde(default = "default_units")]
    pub units: f64,
    #[serde(default)]
    pub billing_cadence: BillingCadence,
}

/// A named bundle of components, as stored in the profile catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Single-service estimate using built-in base rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlatRequest {
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    #[validate(length(min = 1, max = 100))]
    pub service: String,
    /// Hours of usage in the billing period, at most one billion
    #[serde(alias = "usage_hours")]
    #[validate(range(min = 0.0, max = 1e9))]
    pub usage_hours: f64,
}

/// Multi-component estimate driven by a named profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleRequest {
    #[validate(length(min = 1, max = 100))]
    pub region: String,
    #[validate(length(min = 1, max = 100))]
    pub profile: String,
    /// Expected traffic hint. Accepted for forward compatibility, not used
    /// in any computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub traffic: Option<serde_json::Value>,
}

/// Body of `POST /api/estimate`.
///
/// The variant is picked from the fields present: a `profile` key selects
/// bundle mode, `service` + `usageHours` selects flat mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EstimateRequest {
    Bundle(BundleRequest),
    Flat(FlatRequest),
}

impl Validate for EstimateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            EstimateRequest::Bundle(req) => req.validate(),
            EstimateRequest::Flat(req) => req.validate(),
        }
    }
}

impl From<FlatRequest> for EstimateRequest {
    fn from(req: FlatRequest) -> Self {
        EstimateRequest::Flat(req)
    }
}

impl From<BundleRequest> for EstimateRequest {
    fn from(req: BundleRequest) -> Self {
        EstimateRequest::Bundle(req)
    }
}

/// Per-component line of a bundle estimate.
///
/// Either `monthly`/`weekly` are set, or `note` explains why the component
/// could not be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    pub service: String,
    pub units: f64,
    pub billing_cadence: BillingCadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ComponentResult {
    pub fn is_priced(&self) -> bool {
        self.note.is_none()
    }
}

/// Response of `POST /api/estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub region: String,
    /// Set in flat mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Set in bundle mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Flat mode total, equal to `monthlyEstimate`. Keeps the snake_case key
    /// existing clients read.
    #[serde(
        rename = "estimated_cost",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_cost: Option<f64>,
    pub weekly_estimate: f64,
    pub monthly_estimate: f64,
    pub currency: Currency,
    /// Bundle mode breakdown; absent in flat mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentResult>>,
    pub suggestions: Vec<String>,
}

/// Short description of a catalog profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component_count: usize,
}

/// Response of `GET /api/catalog`: what a client may ask for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// Region that never triggers the cheaper-region suggestion
    pub default_region: String,
    /// Regions with a bundle-mode price table
    pub regions: Vec<String>,
    /// Every service priced in at least one region
    pub services: Vec<String>,
    pub profiles: Vec<ProfileSummary>,
    /// Services with a built-in flat-mode base rate
    pub flat_services: Vec<String>,
    /// Regions with a built-in flat-mode modifier
    pub flat_regions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_profile_is_bundle() {
        let request: EstimateRequest = serde_json::from_value(json!({
            "region": "us-east-1",
            "profile": "web-app",
            "traffic": "high"
        }))
        .unwrap();

        match request {
            EstimateRequest::Bundle(req) => {
                assert_eq!(req.profile, "web-app");
                assert_eq!(req.traffic, Some(json!("high")));
            }
            other => panic!("expected bundle request, got {:?}", other),
        }
    }

    #[test]
    fn test_request_accepts_legacy_usage_hours_key() {
        let request: EstimateRequest = serde_json::from_value(json!({
            "region": "us-east-1",
            "service": "EC2",
            "usage_hours": 100
        }))
        .unwrap();

        assert_eq!(
            request,
            EstimateRequest::Flat(FlatRequest {
                region: "us-east-1".to_string(),
                service: "EC2".to_string(),
                usage_hours: 100.0,
            })
        );
    }

    #[test]
    fn test_request_without_selector_is_rejected() {
        let result: Result<EstimateRequest, _> =
            serde_json::from_value(json!({ "region": "us-east-1" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_usage_fails_validation() {
        let request = EstimateRequest::Flat(FlatRequest {
            region: "us-east-1".to_string(),
            service: "EC2".to_string(),
            usage_hours: -1.0,
        });
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("usage_hours"));
    }

    #[test]
    fn test_huge_usage_fails_validation() {
        let request = EstimateRequest::Flat(FlatRequest {
            region: "us-east-1".to_string(),
            service: "RDS".to_string(),
            usage_hours: 1e307,
        });
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("usage_hours"));

        let request = EstimateRequest::Flat(FlatRequest {
            region: "us-east-1".to_string(),
            service: "RDS".to_string(),
            usage_hours: 1e9,
        });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_component_defaults() {
        let component: Component = serde_json::from_value(json!({ "service": "S3" })).unwrap();
        assert_eq!(component.units, 1.0);
        assert_eq!(component.billing_cadence, BillingCadence::Monthly);

        let component: Component =
            serde_json::from_value(json!({ "service": "EC2", "billingCadence": "hourly" }))
                .unwrap();
        assert_eq!(component.billing_cadence, BillingCadence::Hourly);
    }

    #[test]
    fn test_flat_result_omits_bundle_fields() {
        let result = EstimateResult {
            region: "us-east-1".to_string(),
            service: Some("EC2".to_string()),
            profile: None,
            estimated_cost: Some(12.0),
            weekly_estimate: 2.8,
            monthly_estimate: 12.0,
            currency: Currency::Usd,
            components: None,
            suggestions: vec![],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["estimated_cost"], json!(12.0));
        assert_eq!(value["monthlyEstimate"], json!(12.0));
        assert!(value.get("estimatedCost").is_none());
        assert_eq!(value["currency"], json!("USD"));
        assert!(value.get("profile").is_none());
        assert!(value.get("components").is_none());
    }
}
