//! Geocoding adapter - Implements GeocodingPort using integration_maps

use std::{fmt, sync::Arc};

use application::{
    error::ApplicationError,
    ports::{AddressSuggestion, GeocodedPlace, GeocodingPort},
};
use async_trait::async_trait;
use domain::GeoLocation;
use integration_maps::GeocodingClient;
use tracing::instrument;

use super::map_maps_error;

/// Adapter exposing any maps geocoding client as a [`GeocodingPort`]
pub struct MapsGeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl fmt::Debug for MapsGeocodingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsGeocodingAdapter")
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

impl MapsGeocodingAdapter {
    /// Wrap a geocoding client
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for MapsGeocodingAdapter {
    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, ApplicationError> {
        let result = self.client.geocode(query).await.map_err(map_maps_error)?;
        Ok(GeocodedPlace {
            location: result.location,
            formatted_address: result.formatted_address,
            external_id: result.external_id,
        })
    }

    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<String, ApplicationError> {
        self.client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(map_maps_error)
    }

    async fn autocomplete(
        &self,
        input: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError> {
        let suggestions = self
            .client
            .autocomplete(input, limit)
            .await
            .map_err(map_maps_error)?;

        Ok(suggestions
            .into_iter()
            .map(|s| AddressSuggestion {
                description: s.description,
                location: s.location,
                external_id: s.external_id,
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    fn requires_throttling(&self) -> bool {
        self.client.requires_throttling()
    }
}

#[cfg(test)]
mod tests {
    use integration_maps::{GeocodeResult, MapsError, PlaceSuggestion};

    use super::*;

    #[derive(Debug)]
    struct StaticClient;

    #[async_trait]
    impl GeocodingClient for StaticClient {
        async fn geocode(&self, query: &str) -> Result<GeocodeResult, MapsError> {
            if query == "nowhere" {
                return Err(MapsError::NotFound(query.to_string()));
            }
            Ok(GeocodeResult {
                location: GeoLocation::new(48.8606, 2.3376).unwrap(),
                formatted_address: "Louvre, Paris".to_string(),
                external_id: Some("way/1".to_string()),
            })
        }

        async fn reverse_geocode(&self, _: f64, _: f64) -> Result<String, MapsError> {
            Err(MapsError::Timeout { timeout_secs: 10 })
        }

        async fn autocomplete(
            &self,
            input: &str,
            limit: usize,
        ) -> Result<Vec<PlaceSuggestion>, MapsError> {
            Ok((0..limit)
                .map(|i| PlaceSuggestion {
                    description: format!("{input} {i}"),
                    location: None,
                    external_id: None,
                })
                .collect())
        }

        fn provider_name(&self) -> &'static str {
            "static"
        }

        fn requires_throttling(&self) -> bool {
            true
        }
    }

    fn adapter() -> MapsGeocodingAdapter {
        MapsGeocodingAdapter::new(Arc::new(StaticClient))
    }

    #[tokio::test]
    async fn geocode_converts_result() {
        let place = adapter().geocode("Louvre Paris").await.unwrap();
        assert_eq!(place.formatted_address, "Louvre, Paris");
        assert_eq!(place.external_id.as_deref(), Some("way/1"));
    }

    #[tokio::test]
    async fn miss_becomes_not_found() {
        assert!(adapter().geocode("nowhere").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn reverse_timeout_is_external_service() {
        let err = adapter()
            .reverse_geocode(GeoLocation::default_city())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn autocomplete_and_metadata_pass_through() {
        let adapter = adapter();
        let suggestions = adapter.autocomplete("Par", 3).await.unwrap();
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].description, "Par 0");
        assert_eq!(adapter.provider_name(), "static");
        assert!(adapter.requires_throttling());
    }
}
