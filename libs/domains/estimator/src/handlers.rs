//! HTTP handlers for the estimator domain

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{UnknownKeyResponse, ValidationErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EstimatorResult;
use crate::models::{
    BillingCadence, BundleRequest, CatalogSummary, ComponentResult, Currency, EstimateRequest,
    EstimateResult, FlatRequest, ProfileSummary,
};
use crate::service::EstimatorService;

pub const TAG: &str = "estimator";

/// OpenAPI documentation for the estimator API
#[derive(OpenApi)]
#[openapi(
    paths(estimate, get_catalog),
    components(
        schemas(
            EstimateRequest,
            FlatRequest,
            BundleRequest,
            EstimateResult,
            ComponentResult,
            BillingCadence,
            Currency,
            CatalogSummary,
            ProfileSummary,
        ),
        responses(UnknownKeyResponse, ValidationErrorResponse)
    ),
    tags((name = TAG, description = "Cloud cost estimation endpoints"))
)]
pub struct ApiDoc;

/// Create the estimator router
pub fn router(service: EstimatorService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/estimate", post(estimate))
        .route("/catalog", get(get_catalog))
        .with_state(shared_service)
}

/// Estimate weekly and monthly cost
///
/// A body with `profile` is priced from the profile catalog (bundle mode);
/// a body with `service` and `usageHours` uses the built-in rates (flat mode).
#[utoipa::path(
    post,
    path = "/estimate",
    tag = TAG,
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Cost estimate", body = EstimateResult),
        (status = 400, response = UnknownKeyResponse),
        (status = 422, response = ValidationErrorResponse)
    )
)]
async fn estimate(
    State(service): State<Arc<EstimatorService>>,
    ValidatedJson(request): ValidatedJson<EstimateRequest>,
) -> EstimatorResult<Json<EstimateResult>> {
    let result = service.estimate(&request)?;
    Ok(Json(result))
}

/// List regions, services and profiles the estimator knows about
#[utoipa::path(
    get,
    path = "/catalog",
    tag = TAG,
    responses(
        (status = 200, description = "Catalog contents", body = CatalogSummary)
    )
)]
async fn get_catalog(State(service): State<Arc<EstimatorService>>) -> Json<CatalogSummary> {
    Json(service.catalog_summary())
}
