use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Cost Estimator API",
        version = "0.1.0",
        description = "Weekly and monthly cloud cost estimates with optimization suggestions"
    ),
    nest(
        (path = "/api", api = domain_estimator::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_paths_are_nested_under_api() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/estimate"));
        assert!(doc.paths.paths.contains_key("/api/catalog"));
    }
}
