//! Google Maps geocoding client
//!
//! Uses the Geocoding API for forward/reverse lookups and the Places
//! Autocomplete API for suggestions. Keyed and quota-managed by Google,
//! so it is not routed through a [`RateLimiter`](crate::RateLimiter).

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{GeocodeResult, GeocodingClient, MIN_AUTOCOMPLETE_CHARS, PlaceSuggestion};
use crate::config::GoogleMapsConfig;
use crate::error::{MapsError, check_google_status};

/// Google Geocoding API client
#[derive(Debug)]
pub struct GoogleGeocodingClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    timeout_secs: u64,
}

impl GoogleGeocodingClient {
    /// Create a new Google geocoding client
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
impl GeocodingClient for GoogleGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<GeocodeResult, MapsError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MapsError::NotFound("Query must not be empty".to_string()));
        }

        debug!(%query, "Geocoding query");
        let body: GeocodeResponse = self
            .get("/maps/api/geocode/json", &[("address", query.to_string())])
            .await?;
        check_google_status(&body.status, body.error_message.as_deref(), query)?;

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::NotFound(query.to_string()))?;
        let location = GeoLocation::new(result.geometry.location.lat, result.geometry.location.lng)
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        Ok(GeocodeResult {
            location,
            formatted_address: result.formatted_address,
            external_id: result.place_id,
        })
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, MapsError> {
        let latlng = format!("{latitude},{longitude}");
        let body: GeocodeResponse = self
            .get("/maps/api/geocode/json", &[("latlng", latlng.clone())])
            .await?;
        check_google_status(&body.status, body.error_message.as_deref(), &latlng)?;

        body.results
            .into_iter()
            .map(|r| r.formatted_address)
            .find(|a| !a.is_empty())
            .ok_or(MapsError::NotFound(latlng))
    }

    #[instrument(skip(self))]
    async fn autocomplete(
        &self,
        input: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, MapsError> {
        let input = input.trim();
        if input.chars().count() < MIN_AUTOCOMPLETE_CHARS || limit == 0 {
            return Ok(Vec::new());
        }

        let body: AutocompleteResponse = self
            .get("/maps/api/place/autocomplete/json", &[("input", input.to_string())])
            .await?;
        match check_google_status(&body.status, body.error_message.as_deref(), input) {
            Ok(()) => {}
            Err(MapsError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        }

        Ok(body
            .predictions
            .into_iter()
            .take(limit)
            .map(|p| PlaceSuggestion {
                description: p.description,
                location: None,
                external_id: p.place_id,
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }

    fn requires_throttling(&self) -> bool {
        false
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GoogleGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: GoogleGeometry,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<GooglePrediction>,
}

#[derive(Debug, Deserialize)]
struct GooglePrediction {
    description: String,
    #[serde(default)]
    place_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        let err = GoogleGeocodingClient::new(&GoogleMapsConfig::default()).unwrap_err();
        assert!(matches!(err, MapsError::ConfigurationMissing(_)));
    }

    #[test]
    fn not_throttled() {
        let client = GoogleGeocodingClient::new(&GoogleMapsConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(!client.requires_throttling());
        assert_eq!(client.provider_name(), "google");
    }

    #[test]
    fn status_mapping() {
        assert!(check_google_status("OK", None, "q").is_ok());
        assert!(matches!(
            check_google_status("ZERO_RESULTS", None, "q"),
            Err(MapsError::NotFound(_))
        ));
        assert!(matches!(
            check_google_status("OVER_QUERY_LIMIT", None, "q"),
            Err(MapsError::RateLimitExceeded)
        ));
        match check_google_status("REQUEST_DENIED", Some("bad key"), "q") {
            Err(MapsError::RequestFailed(msg)) => assert_eq!(msg, "REQUEST_DENIED: bad key"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
