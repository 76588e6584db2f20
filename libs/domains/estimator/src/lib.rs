//! Estimator Domain
//!
//! Weekly and monthly cost estimates for cloud deployments, with rule-based
//! optimization advice.
//!
//! Two request shapes are served:
//!
//! - **flat**: one service and its usage hours, priced from a built-in rate
//!   table with per-region multipliers
//! - **bundle**: a named profile of components, priced from the static
//!   region catalog loaded at startup
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /estimate, GET /catalog
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Flat and bundle estimation
//! └──┬───┬───┬──┘
//!    │   │   │
//!    │   │ ┌─▼───────────┐
//!    │   │ │ Suggestions │  ← Ordered rule table
//!    │   │ └─────────────┘
//!    │ ┌─▼───────────┐
//!    │ │  Projector  │  ← Hourly/monthly -> weekly/monthly
//!    │ └─────────────┘
//! ┌──▼──────────┐
//! │  Catalogs   │  ← Pricing and profile documents, rate table
//! └─────────────┘
//! ```

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod projector;
pub mod rates;
pub mod service;
pub mod suggestions;

pub use catalog::{CatalogPaths, Catalogs, PricingCatalog, ProfileCatalog};
pub use error::{CatalogError, CatalogKind, EstimatorError, EstimatorResult};
pub use handlers::ApiDoc;
pub use models::{
    BillingCadence, BundleRequest, CatalogSummary, Component, ComponentResult, Currency,
    EstimateRequest, EstimateResult, FlatRequest, Profile, ProfileSummary,
};
pub use projector::{Projection, project};
pub use rates::RateTable;
pub use service::EstimatorService;
pub use suggestions::{DEFAULT_REGION, Subject, suggest};
