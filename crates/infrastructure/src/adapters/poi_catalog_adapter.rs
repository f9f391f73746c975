//! POI catalog adapter - Implements PoiCatalogPort using integration_maps

use std::{fmt, sync::Arc};

use application::{
    error::ApplicationError,
    ports::{NearbyPlace, PoiCatalogPort},
};
use async_trait::async_trait;
use domain::GeoLocation;
use integration_maps::PoiCatalog;
use tracing::{debug, instrument};

use super::map_maps_error;

/// Adapter exposing a maps POI catalog as a [`PoiCatalogPort`]
pub struct PoiCatalogAdapter {
    catalog: Arc<dyn PoiCatalog>,
}

impl fmt::Debug for PoiCatalogAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoiCatalogAdapter")
            .field("provider", &self.catalog.provider_name())
            .finish()
    }
}

impl PoiCatalogAdapter {
    /// Wrap a POI catalog
    pub fn new(catalog: Arc<dyn PoiCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl PoiCatalogPort for PoiCatalogAdapter {
    #[instrument(skip(self), fields(provider = self.catalog.provider_name()))]
    async fn nearby(
        &self,
        location: GeoLocation,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<NearbyPlace>, ApplicationError> {
        let candidates = self
            .catalog
            .nearby(location, radius_m, limit)
            .await
            .map_err(map_maps_error)?;
        debug!(count = candidates.len(), "POI candidates");

        Ok(candidates
            .into_iter()
            .map(|c| NearbyPlace {
                name: c.name,
                rating: c.rating,
                review_count: c.review_count,
                price_level: c.price_level,
                external_id: c.external_id,
                kinds: c.kinds,
            })
            .collect())
    }

    async fn opening_hours(
        &self,
        external_id: &str,
    ) -> Result<Option<Vec<String>>, ApplicationError> {
        self.catalog
            .opening_hours(external_id)
            .await
            .map_err(map_maps_error)
    }
}

#[cfg(test)]
mod tests {
    use integration_maps::{MapsError, PoiCandidate};

    use super::*;

    #[derive(Debug)]
    struct OneCandidate;

    #[async_trait]
    impl PoiCatalog for OneCandidate {
        async fn nearby(
            &self,
            _: GeoLocation,
            radius_m: u32,
            _: u32,
        ) -> Result<Vec<PoiCandidate>, MapsError> {
            if radius_m == 0 {
                return Err(MapsError::RateLimitExceeded);
            }
            Ok(vec![PoiCandidate {
                name: "Musée du Louvre".to_string(),
                rating: Some(5.0),
                review_count: None,
                price_level: Some(2),
                external_id: Some("W123".to_string()),
                kinds: vec!["museums".to_string()],
            }])
        }

        fn provider_name(&self) -> &'static str {
            "one"
        }
    }

    #[tokio::test]
    async fn nearby_maps_candidates() {
        let adapter = PoiCatalogAdapter::new(Arc::new(OneCandidate));
        let places = adapter
            .nearby(GeoLocation::default_city(), 1000, 10)
            .await
            .unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Musée du Louvre");
        assert_eq!(places[0].price_level, Some(2));
        assert_eq!(places[0].external_id.as_deref(), Some("W123"));
        assert_eq!(places[0].kinds, ["museums"]);
    }

    #[tokio::test]
    async fn default_opening_hours_are_absent() {
        let adapter = PoiCatalogAdapter::new(Arc::new(OneCandidate));
        assert_eq!(adapter.opening_hours("W123").await.unwrap(), None);
    }

    #[tokio::test]
    async fn quota_errors_are_rate_limited() {
        let adapter = PoiCatalogAdapter::new(Arc::new(OneCandidate));
        let err = adapter
            .nearby(GeoLocation::default_city(), 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }
}
