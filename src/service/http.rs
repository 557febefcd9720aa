use std::time::Duration;

use reqwest::Client;

use crate::error::{CatalogError, Result};

const USER_AGENT: &str = concat!("crag-finder/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client for the remote catalog. The timeout is a
/// whole-request deadline; an elapsed deadline surfaces as
/// `CatalogError::Timeout`.
pub fn create_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CatalogError::config(format!("failed to build HTTP client: {e}")))
}
