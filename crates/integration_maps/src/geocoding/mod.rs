//! Geocoding backends
//!
//! Both backends implement [`GeocodingClient`]. Nominatim is throttled through
//! a shared [`RateLimiter`](crate::RateLimiter); Google is keyed and is not.

mod google;
mod nominatim;

use async_trait::async_trait;
use domain::GeoLocation;
use serde::Serialize;

pub use google::GoogleGeocodingClient;
pub use nominatim::NominatimGeocodingClient;

use crate::error::MapsError;

/// A resolved place
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Coordinates of the best match
    pub location: GeoLocation,
    /// Provider-formatted address
    pub formatted_address: String,
    /// Provider identifier (OSM `type/id` or Google `place_id`)
    pub external_id: Option<String>,
}

/// An autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    /// Human-readable label
    pub description: String,
    /// Coordinates, when the backend returns them with the suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    /// Provider identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form query to its best match
    ///
    /// Zero results surface as [`MapsError::NotFound`].
    async fn geocode(&self, query: &str) -> Result<GeocodeResult, MapsError>;

    /// Convert coordinates to a human-readable address
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<String, MapsError>;

    /// Suggest places for a partial query
    async fn autocomplete(
        &self,
        input: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, MapsError>;

    /// Short backend name for logs and health output
    fn provider_name(&self) -> &'static str;

    /// Whether callers should pace their own request bursts for this backend
    fn requires_throttling(&self) -> bool;
}

/// Minimum input length before autocomplete hits the network
pub(crate) const MIN_AUTOCOMPLETE_CHARS: usize = 2;
