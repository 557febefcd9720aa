//! Remote catalog client.
//!
//! One HTTP round trip per call: no retry, no pagination, no coalescing.
//! Overlapping searches are independent completions; each caller merges its
//! own result into the store on arrival.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::CatalogConfig;
use crate::domain::models::{Climb, Coordinate};
use crate::error::{CatalogError, Result};
use crate::service::http::create_client;

/// Response envelope of the routes-for-lat-lon endpoint.
#[derive(Debug, Deserialize)]
struct RouteResponse {
    routes: Vec<Climb>,
}

pub struct RemoteCatalog {
    client: Client,
    config: CatalogConfig,
}

impl RemoteCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = create_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Fetch up to `max_results` climbs within `max_distance_miles` of the
    /// given point.
    pub async fn fetch_climbs(&self, coordinate: Coordinate) -> Result<Vec<Climb>> {
        let url = self.request_url(coordinate)?;
        tracing::debug!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            "requesting climbs from remote catalog"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::transport(format!(
                "catalog returned status {status}"
            )));
        }

        let body: RouteResponse = response.json().await?;
        tracing::info!(count = body.routes.len(), "fetched climbs");
        Ok(body.routes)
    }

    fn request_url(&self, coordinate: Coordinate) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| CatalogError::config(format!("invalid catalog base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string())
            .append_pair("maxDistance", &self.config.max_distance_miles.to_string())
            .append_pair("maxResults", &self.config.max_results.to_string())
            .append_pair("key", &self.config.api_key);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn catalog_for(server: &mockito::Server) -> RemoteCatalog {
        let config = CatalogConfig::new("test-key")
            .with_base_url(format!("{}/data/get-routes-for-lat-lon", server.url()));
        RemoteCatalog::new(config).unwrap()
    }

    #[test]
    fn request_url_carries_all_query_parameters() {
        let catalog = RemoteCatalog::new(CatalogConfig::new("secret")).unwrap();
        let url = catalog
            .request_url(Coordinate::new(37.3229978, -122.0321823))
            .unwrap();

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("lat".into(), "37.3229978".into())));
        assert!(query.contains(&("lon".into(), "-122.0321823".into())));
        assert!(query.contains(&("maxDistance".into(), "120".into())));
        assert!(query.contains(&("maxResults".into(), "500".into())));
        assert!(query.contains(&("key".into(), "secret".into())));
    }

    #[tokio::test]
    async fn fetch_climbs_decodes_routes_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(fixtures::routes_body(&[
                fixtures::route_json(1, "Sport", 39.0, -105.0),
                fixtures::route_json(2, "Trad, Alpine", 39.1, -105.1),
            ]))
            .create_async()
            .await;

        let climbs = catalog_for(&server)
            .fetch_climbs(Coordinate::new(39.0, -105.0))
            .await
            .unwrap();

        assert_eq!(climbs.len(), 2);
        assert_eq!(climbs[0].id, 1);
        assert_eq!(climbs[1].type_tag, "Trad, Alpine");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("{\"routes\": \"not an array\"}")
            .create_async()
            .await;

        let err = catalog_for(&server)
            .fetch_climbs(Coordinate::new(39.0, -105.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn server_error_status_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = catalog_for(&server)
            .fetch_climbs(Coordinate::new(39.0, -105.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Bind a server to learn a free port, then shut it down.
        let url = {
            let server = mockito::Server::new_async().await;
            format!("{}/data/get-routes-for-lat-lon", server.url())
        };
        let config = CatalogConfig::new("test-key").with_base_url(url);
        let catalog = RemoteCatalog::new(config).unwrap();

        let err = catalog
            .fetch_climbs(Coordinate::new(39.0, -105.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)), "got {err:?}");
    }
}
