//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Both a body that is not the expected JSON document (`JSON_EXTRACTION`)
/// and a well-formed body failing validation (`VALIDATION_ERROR`) use 422.
#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - malformed body or failed validation",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "usage_hours": [{
                "code": "range",
                "message": null,
                "params": {"min": 0.0, "max": 1e9, "value": -5.0}
            }]
        }
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Unknown catalog key",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "UNKNOWN_KEY",
        "message": "Unknown region: 'mars-1'",
        "details": {"kind": "region", "key": "mars-1"}
    })
)]
pub struct UnknownKeyResponse(pub ErrorResponse);
