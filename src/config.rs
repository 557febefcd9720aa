//! Catalog configuration.
//!
//! The API credential is injected here (flag, environment, or the stored
//! setting), never compiled into the binary.

use std::time::Duration;

use crate::error::{CatalogError, Result};

pub const DEFAULT_BASE_URL: &str =
    "https://www.mountainproject.com/data/get-routes-for-lat-lon";
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 120.0;
pub const DEFAULT_MAX_RESULTS: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "CRAG_API_KEY";

/// Configuration for the remote catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    /// Search radius sent to the catalog, miles.
    pub max_distance_miles: f64,
    /// Cap on records per request; the catalog does not paginate.
    pub max_results: u32,
    /// Whole-request deadline.
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
            max_results: DEFAULT_MAX_RESULTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the credential from `CRAG_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| CatalogError::config(format!("{API_KEY_ENV} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(CatalogError::config(format!("{API_KEY_ENV} is empty")));
        }
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_distance_miles(mut self, miles: f64) -> Self {
        self.max_distance_miles = miles;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Whether every discipline starts enabled or none do. Surfaces differ on
/// this, so it is a construction-time choice rather than fixed behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDefault {
    All,
    None,
}
