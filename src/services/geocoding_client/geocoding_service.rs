use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};
use urlencoding::encode;

use super::types::{
    geocoding_service_error::GeocodingServiceError,
    mapbox_geocoding_response::MapboxGeocodingResponse,
};
use crate::{search::state::MAX_RESULTS, types::search_result::SearchResult};

pub const DEFAULT_GEOCODING_HOST: &str = "https://api.mapbox.com";
pub const PLACE_TYPES: &str = "country,place,region";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Resolves free text into place candidates, most relevant first.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search_places(&self, query: &str) -> Result<Vec<SearchResult>, GeocodingServiceError>;
}

#[derive(Clone)]
pub struct GeocodingServiceConfig {
    pub access_token: Option<String>,
    pub host: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeocodingService {
    config: GeocodingServiceConfig,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(config: GeocodingServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build geocoding client, falling back to defaults: {}", e);
                reqwest::Client::new()
            });

        Self { config, client }
    }

    fn access_token(&self) -> Option<&str> {
        self.config
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl Geocoder for GeocodingService {
    async fn search_places(&self, query: &str) -> Result<Vec<SearchResult>, GeocodingServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let token = self
            .access_token()
            .ok_or(GeocodingServiceError::MissingCredential)?;

        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json?access_token={}&types={}&limit={}",
            self.config.host,
            encode(query),
            encode(token),
            PLACE_TYPES,
            MAX_RESULTS
        );

        let resp = self.client.get(&url).send().await.map_err(|e| {
            debug!("Failed to send geocoding request: {}", e);
            GeocodingServiceError::NetworkFailure
        })?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(GeocodingServiceError::Unauthorized),
            s => return Err(GeocodingServiceError::UnexpectedStatus(s.as_u16())),
        }

        // timeouts can also hit while the body is still arriving
        let bytes = resp.bytes().await.map_err(|e| {
            debug!("Failed to read geocoding response body: {}", e);
            GeocodingServiceError::NetworkFailure
        })?;

        let body = serde_json::from_slice::<MapboxGeocodingResponse>(&bytes).map_err(|e| {
            debug!("Failed to parse geocoding response body: {}", e);
            GeocodingServiceError::MalformedResponse
        })?;

        Ok(body
            .features
            .into_iter()
            .take(MAX_RESULTS)
            .map(|f| SearchResult {
                id: f.id,
                label: f.place_name,
                center: f.center.into(),
                bounding_box: f.bbox.map(Into::into),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::{
        services::geocoding_client::types::mapbox_geocoding_response::MapboxGeocodingFeature,
        types::search_result::{BoundingBox, LngLat},
    };

    fn service(host: String, token: Option<&str>) -> GeocodingService {
        GeocodingService::new(GeocodingServiceConfig {
            access_token: token.map(str::to_string),
            host,
            timeout: REQUEST_TIMEOUT,
        })
    }

    #[tokio::test]
    async fn maps_features_in_order() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = MapboxGeocodingResponse {
            features: vec![
                MapboxGeocodingFeature {
                    id: "country.ke".to_string(),
                    place_type: vec!["country".to_string()],
                    place_name: "Kenya".to_string(),
                    center: [37.9, 0.0],
                    bbox: Some([33.9, -4.7, 41.9, 5.5]),
                },
                MapboxGeocodingFeature {
                    id: "place.kenya".to_string(),
                    place_type: vec!["place".to_string()],
                    place_name: "Kenya, Ohio".to_string(),
                    center: [-83.1, 40.1],
                    bbox: None,
                },
            ],
        };

        let mock = server
            .mock("GET", "/geocoding/v5/mapbox.places/Kenya.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("access_token".into(), "pk.test".into()),
                Matcher::UrlEncoded("types".into(), "country,place,region".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_response).unwrap())
            .create_async()
            .await;

        let results = service(server.url(), Some("pk.test"))
            .search_places("  Kenya ")
            .await
            .unwrap();

        mock.assert();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "country.ke");
        assert_eq!(results[0].label, "Kenya");
        assert_eq!(results[0].center, LngLat::new(37.9, 0.0));
        assert_eq!(
            results[0].bounding_box,
            Some(BoundingBox::from([33.9, -4.7, 41.9, 5.5]))
        );
        assert_eq!(results[1].id, "place.kenya");
        assert_eq!(results[1].bounding_box, None);
    }

    #[tokio::test]
    async fn missing_token_skips_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        for token in [None, Some(""), Some("   ")] {
            let err = service(server.url(), token)
                .search_places("Kenya")
                .await
                .unwrap_err();
            assert_eq!(err, GeocodingServiceError::MissingCredential);
        }

        mock.assert();
    }

    #[tokio::test]
    async fn unauthorized_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocoding/v5/mapbox.places/Kenya.json")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(json!({"message": "Not Authorized - Invalid Token"}).to_string())
            .create_async()
            .await;

        let err = service(server.url(), Some("pk.bad"))
            .search_places("Kenya")
            .await
            .unwrap_err();

        assert_eq!(err, GeocodingServiceError::Unauthorized);
    }

    #[tokio::test]
    async fn other_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocoding/v5/mapbox.places/Kenya.json")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = service(server.url(), Some("pk.test"))
            .search_places("Kenya")
            .await
            .unwrap_err();

        assert_eq!(err, GeocodingServiceError::UnexpectedStatus(429));
    }

    #[tokio::test]
    async fn malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocoding/v5/mapbox.places/Kenya.json")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(json!({"features": [{"id": 3}]}).to_string())
            .create_async()
            .await;

        let err = service(server.url(), Some("pk.test"))
            .search_places("Kenya")
            .await
            .unwrap_err();

        assert_eq!(err, GeocodingServiceError::MalformedResponse);
    }

    #[tokio::test]
    async fn unreachable_host() {
        let err = service("http://127.0.0.1:1".to_string(), Some("pk.test"))
            .search_places("Kenya")
            .await
            .unwrap_err();

        assert_eq!(err, GeocodingServiceError::NetworkFailure);
    }

    #[tokio::test]
    async fn body_stalling_past_timeout_is_network_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocoding/v5/mapbox.places/Kenya.json")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                w.write_all(b"{\"features\": [")?;
                w.flush()?;
                std::thread::sleep(std::time::Duration::from_secs(2));
                w.write_all(b"]}")
            })
            .create_async()
            .await;

        let service = GeocodingService::new(GeocodingServiceConfig {
            access_token: Some("pk.test".to_string()),
            host: server.url(),
            timeout: Duration::from_millis(300),
        });

        let err = service.search_places("Kenya").await.unwrap_err();

        assert_eq!(err, GeocodingServiceError::NetworkFailure);
    }
}
