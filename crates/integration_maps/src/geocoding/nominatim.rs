//! Nominatim geocoding client
//!
//! Converts free-form queries to coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Every request goes through the shared [`RateLimiter`] (Nominatim allows at
//! most one request per second) and forward lookups are cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{GeocodeResult, GeocodingClient, MIN_AUTOCOMPLETE_CHARS, PlaceSuggestion};
use crate::config::NominatimConfig;
use crate::error::MapsError;
use crate::rate_limiter::RateLimiter;

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, GeocodeResult>>,
    limiter: Arc<RateLimiter>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// `limiter` must be the process-wide instance for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig, limiter: Arc<RateLimiter>) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            limiter,
        })
    }

    /// The limiter this client paces itself with
    #[must_use]
    pub const fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NominatimResult>, MapsError> {
        self.limiter.acquire().await;

        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", limit.to_string()),
            ("addressdetails", "1".to_string()),
        ];
        if let Some(country) = self.config.country_filter.as_deref().filter(|c| !c.is_empty()) {
            params.push(("countrycodes", country.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| MapsError::from_transport(&e, self.config.timeout_secs))?;

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
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<GeocodeResult, MapsError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MapsError::NotFound("Query must not be empty".to_string()));
        }

        let cache_key = query.to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(hit);
            }
        }

        debug!(%query, "Geocoding query");
        let results = self.search(query, 1).await?;
        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::NotFound(query.to_string()))?;
        let resolved = result.into_geocode_result()?;

        debug!(
            %query,
            lat = resolved.location.latitude(),
            lng = resolved.location.longitude(),
            "Geocoding successful"
        );

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, resolved.clone()).await;
        }
        Ok(resolved)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, MapsError> {
        self.limiter.acquire().await;

        let url = format!("{}/reverse", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .send()
            .await
            .map_err(|e| MapsError::from_transport(&e, self.config.timeout_secs))?;

        if !response.status().is_success() {
            return Err(MapsError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let result: NominatimReverseResult = response
            .json()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        match (result.display_name, result.error) {
            (Some(name), _) if !name.is_empty() => Ok(name),
            (_, Some(error)) => Err(MapsError::NotFound(error)),
            _ => Err(MapsError::NotFound(format!("{latitude}, {longitude}"))),
        }
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

        let results = self.search(input, limit).await?;
        Ok(results
            .into_iter()
            .filter_map(|r| r.into_geocode_result().ok())
            .map(|r| PlaceSuggestion {
                description: r.formatted_address,
                location: Some(r.location),
                external_id: r.external_id,
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }

    fn requires_throttling(&self) -> bool {
        true
    }
}

/// Nominatim search result (subset of fields)
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    osm_type: Option<String>,
    #[serde(default)]
    osm_id: Option<u64>,
}

impl NominatimResult {
    fn into_geocode_result(self) -> Result<GeocodeResult, MapsError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| MapsError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| MapsError::ParseError("Invalid longitude".to_string()))?;
        let location =
            GeoLocation::new(lat, lon).map_err(|e| MapsError::ParseError(e.to_string()))?;

        let external_id = match (self.osm_type, self.osm_id) {
            (Some(kind), Some(id)) => Some(format!("{kind}/{id}")),
            _ => None,
        };

        Ok(GeocodeResult {
            location,
            formatted_address: self.display_name,
            external_id,
        })
    }
}

/// Nominatim reverse result; misses carry an `error` field instead of a 404
#[derive(Debug, Deserialize)]
struct NominatimReverseResult {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}
