use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, ErrorResponse};
use serde_json::json;
use strum::Display;
use thiserror::Error;

/// Result type for estimation operations
pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Which catalog a missing key was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogKind {
    Region,
    Profile,
}

/// Errors returned to callers of the estimator
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Region or profile absent from its catalog
    #[error("Unknown {kind}: '{key}'")]
    NotFound { kind: CatalogKind, key: String },
}

impl EstimatorError {
    pub fn unknown_region(region: impl Into<String>) -> Self {
        Self::NotFound {
            kind: CatalogKind::Region,
            key: region.into(),
        }
    }

    pub fn unknown_profile(profile: impl Into<String>) -> Self {
        Self::NotFound {
            kind: CatalogKind::Profile,
            key: profile.into(),
        }
    }
}

impl IntoResponse for EstimatorError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            EstimatorError::NotFound { kind, key } => {
                tracing::info!(
                    error_code = ErrorCode::UnknownKey.code(),
                    %kind,
                    %key,
                    "Estimate rejected"
                );

                let body = Json(ErrorResponse {
                    code: ErrorCode::UnknownKey.code(),
                    error: ErrorCode::UnknownKey.as_str().to_string(),
                    message,
                    details: Some(json!({ "kind": kind.to_string(), "key": key })),
                });

                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Errors raised while loading a catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid price {price} for service '{service}' in region '{region}'")]
    InvalidPrice {
        region: String,
        service: String,
        price: f64,
    },

    #[error("Invalid units {units} for service '{service}' in profile '{profile}'")]
    InvalidUnits {
        profile: String,
        service: String,
        units: f64,
    },
}
