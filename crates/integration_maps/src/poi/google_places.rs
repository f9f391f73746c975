//! Google Places client (Nearby Search + Place Details)

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{PoiCandidate, PoiCatalog};
use crate::config::GoogleMapsConfig;
use crate::error::{MapsError, check_google_status};

/// Google Places API client
///
/// Photo references are not turned into image URLs: those URLs embed the
/// API key, and enriched places are persisted and shared publicly.
#[derive(Debug)]
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    timeout_secs: u64,
}

impl GooglePlacesClient {
    /// Create a new Google Places client
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::ConfigurationMissing`] without an API key, or an
    /// error if the HTTP client cannot be initialized.
    pub fn new(config: &GoogleMapsConfig) -> Result<Self, MapsError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| MapsError::ConfigurationMissing("google.api_key".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::from(api_key.to_string()),
            timeout_secs: config.timeout_secs,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| MapsError::from_transport(&e, self.timeout_secs))?;

        if !response.status().is_success() {
            return Err(MapsError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl PoiCatalog for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn nearby(
        &self,
        location: GeoLocation,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PoiCandidate>, MapsError> {
        let body: NearbyResponse = self
            .get(
                "/maps/api/place/nearbysearch/json",
                &[
                    (
                        "location",
                        format!("{},{}", location.latitude(), location.longitude()),
                    ),
                    ("radius", radius_m.to_string()),
                ],
            )
            .await?;

        match check_google_status(&body.status, body.error_message.as_deref(), "nearby") {
            Ok(()) => {}
            Err(MapsError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        }

        let candidates: Vec<PoiCandidate> = body
            .results
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|r| PoiCandidate {
                name: r.name,
                rating: r.rating.filter(|v| (0.0..=5.0).contains(v)),
                review_count: r.user_ratings_total,
                price_level: r.price_level.filter(|p| *p <= 4),
                external_id: r.place_id,
                kinds: r.types,
            })
            .collect();
        debug!(count = candidates.len(), "Google Places candidates");
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn opening_hours(&self, external_id: &str) -> Result<Option<Vec<String>>, MapsError> {
        let body: DetailsResponse = self
            .get(
                "/maps/api/place/details/json",
                &[
                    ("place_id", external_id.to_string()),
                    ("fields", "opening_hours".to_string()),
                ],
            )
            .await?;

        match check_google_status(&body.status, body.error_message.as_deref(), external_id) {
            Ok(()) => {}
            Err(MapsError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        }

        Ok(body
            .result
            .and_then(|r| r.opening_hours)
            .map(|h| h.weekday_text)
            .filter(|t| !t.is_empty()))
    }

    fn provider_name(&self) -> &'static str {
        "google_places"
    }
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    name: String,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    weekday_text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            GooglePlacesClient::new(&GoogleMapsConfig::default()),
            Err(MapsError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn parses_nearby_result() {
        let body: NearbyResponse = serde_json::from_str(
            r#"{"status":"OK","results":[{"name":"Louvre Museum","rating":4.7,"user_ratings_total":250000,"price_level":2,"place_id":"abc","types":["museum"]}]}"#,
        )
        .unwrap();
        assert_eq!(body.results.len(), 1);
        assert_eq!(body.results[0].user_ratings_total, Some(250_000));
        assert_eq!(body.results[0].types, vec!["museum"]);
    }
}
