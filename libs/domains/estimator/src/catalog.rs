//! Static pricing and profile catalogs.
//!
//! Both catalogs are read once at startup from JSON documents and are
//! immutable afterwards. Lookups never fail: an unknown key is `None`, and
//! what to do about it is the caller's decision.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::error::CatalogError;
use crate::models::{Profile, ProfileSummary};

/// Region -> service -> unit price.
///
/// Source document:
///
/// ```json
/// { "us-east-1": { "EC2": 0.0416, "S3": 0.023 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingCatalog {
    regions: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PricingCatalog {
    /// Builds a catalog, rejecting negative or non-finite prices.
    pub fn new(regions: BTreeMap<String, BTreeMap<String, f64>>) -> Result<Self, CatalogError> {
        for (region, services) in &regions {
            for (service, &price) in services {
                if !price.is_finite() || price < 0.0 {
                    return Err(CatalogError::InvalidPrice {
                        region: region.clone(),
                        service: service.clone(),
                        price,
                    });
                }
            }
        }

        Ok(Self { regions })
    }

    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, CatalogError> {
        Self::new(parse_json(reader, origin)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        Self::from_reader(open(path)?, path)
    }

    /// Unit price of `service` in `region`, if both are known.
    pub fn lookup(&self, region: &str, service: &str) -> Option<f64> {
        self.regions.get(region)?.get(service).copied()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Every service priced in at least one region, sorted and deduplicated.
    pub fn services(&self) -> Vec<&str> {
        let mut services: Vec<&str> = self
            .regions
            .values()
            .flat_map(|services| services.keys().map(String::as_str))
            .collect();
        services.sort_unstable();
        services.dedup();
        services
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Profile name -> profile.
///
/// Source document:
///
/// ```json
/// {
///   "web-app": {
///     "description": "Two app servers and object storage",
///     "components": [
///       { "service": "EC2", "units": 2, "billingCadence": "hourly" },
///       { "service": "S3", "units": 50 }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCatalog {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileCatalog {
    /// Builds a catalog, rejecting components whose units are not positive.
    pub fn new(profiles: BTreeMap<String, Profile>) -> Result<Self, CatalogError> {
        for (name, profile) in &profiles {
            for component in &profile.components {
                if !component.units.is_finite() || component.units <= 0.0 {
                    return Err(CatalogError::InvalidUnits {
                        profile: name.clone(),
                        service: component.service.clone(),
                        units: component.units,
                    });
                }
            }
        }

        Ok(Self { profiles })
    }

    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, CatalogError> {
        Self::new(parse_json(reader, origin)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        Self::from_reader(open(path)?, path)
    }

    pub fn lookup(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn summaries(&self) -> Vec<ProfileSummary> {
        self.profiles
            .iter()
            .map(|(name, profile)| ProfileSummary {
                name: name.clone(),
                description: profile.description.clone(),
                component_count: profile.components.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Locations of the catalog documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub pricing: PathBuf,
    pub profiles: PathBuf,
}

/// Both catalogs, loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub pricing: PricingCatalog,
    pub profiles: ProfileCatalog,
}

impl Catalogs {
    pub fn new(pricing: PricingCatalog, profiles: ProfileCatalog) -> Self {
        Self { pricing, profiles }
    }

    /// Loads both catalogs. Any failure is fatal for the caller: there is no
    /// partially loaded state.
    #[instrument(skip_all, fields(pricing = %paths.pricing.display(), profiles = %paths.profiles.display()))]
    pub fn load(paths: &CatalogPaths) -> Result<Self, CatalogError> {
        let pricing = PricingCatalog::load(&paths.pricing)?;
        let profiles = ProfileCatalog::load(&paths.profiles)?;

        info!(
            regions = pricing.len(),
            profiles = profiles.len(),
            "Catalogs loaded"
        );

        Ok(Self { pricing, profiles })
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CatalogError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_json<T: DeserializeOwned, R: Read>(reader: R, origin: &Path) -> Result<T, CatalogError> {
    serde_json::from_reader(reader).map_err(|source| CatalogError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}
