//! Geocoding port
//!
//! Resolves free-text place names to coordinates. Adapters in the
//! infrastructure layer pick the backend (open or commercial) at construction
//! time; callers only see this interface.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Coordinates of the best match
    pub location: GeoLocation,
    /// Provider-formatted address
    pub formatted_address: String,
    /// Provider-specific place identifier
    pub external_id: Option<String>,
}

/// An address suggestion for partial input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSuggestion {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a query to its best match
    ///
    /// Zero results are [`ApplicationError::NotFound`].
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, ApplicationError>;

    /// Convert coordinates to a formatted address
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<String, ApplicationError>;

    /// Suggest addresses for partial input
    async fn autocomplete(
        &self,
        input: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError>;

    /// Name of the active backend
    fn provider_name(&self) -> &'static str;

    /// Whether bursts of requests must be paced for this backend
    fn requires_throttling(&self) -> bool;
}
