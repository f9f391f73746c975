//! Backend selection
//!
//! Picks the geodata backends once at startup from the configured credentials:
//!
//! - Google key present: Google geocoding and Google Places, no throttling.
//! - Otherwise: Nominatim behind one shared [`RateLimiter`], plus OpenTripMap
//!   when its key is present.
//! - Wikipedia thumbnails whenever enabled.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::geocoding::{GeocodingClient, GoogleGeocodingClient, NominatimGeocodingClient};
use crate::poi::{GooglePlacesClient, OpenTripMapClient, PoiCatalog};
use crate::rate_limiter::RateLimiter;
use crate::wikipedia::WikipediaClient;

/// The selected geodata backends
#[derive(Clone)]
pub struct MapsProviders {
    /// Primary geocoder
    pub geocoder: Arc<dyn GeocodingClient>,
    /// Optional POI catalog
    pub poi_catalog: Option<Arc<dyn PoiCatalog>>,
    /// Optional thumbnail lookup
    pub thumbnails: Option<Arc<WikipediaClient>>,
}

impl fmt::Debug for MapsProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsProviders")
            .field("geocoder", &self.geocoder.provider_name())
            .field(
                "poi_catalog",
                &self.poi_catalog.as_ref().map(|p| p.provider_name()),
            )
            .field("thumbnails", &self.thumbnails.is_some())
            .finish()
    }
}

impl MapsProviders {
    /// Build the backends for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if a selected client cannot be constructed.
    pub fn from_config(config: &MapsConfig) -> Result<Self, MapsError> {
        let wikipedia = if config.wikipedia.enabled {
            Some(Arc::new(WikipediaClient::new(&config.wikipedia)?))
        } else {
            None
        };

        if config.google.has_api_key() {
            let geocoder: Arc<dyn GeocodingClient> =
                Arc::new(GoogleGeocodingClient::new(&config.google)?);
            let places: Arc<dyn PoiCatalog> = Arc::new(GooglePlacesClient::new(&config.google)?);
            info!(
                geocoder = "google",
                poi = "google_places",
                thumbnails = wikipedia.is_some(),
                "Maps providers selected"
            );
            return Ok(Self {
                geocoder,
                poi_catalog: Some(places),
                thumbnails: wikipedia,
            });
        }

        let limiter = Arc::new(RateLimiter::from_millis(config.nominatim.min_interval_ms));
        let geocoder: Arc<dyn GeocodingClient> =
            Arc::new(NominatimGeocodingClient::new(&config.nominatim, limiter)?);
        let poi_catalog: Option<Arc<dyn PoiCatalog>> = if config.opentripmap.has_api_key() {
            Some(Arc::new(OpenTripMapClient::new(&config.opentripmap)?))
        } else {
            None
        };

        info!(
            geocoder = "nominatim",
            poi = poi_catalog.as_ref().map_or("none", |p| p.provider_name()),
            thumbnails = wikipedia.is_some(),
            min_interval_ms = config.nominatim.min_interval_ms,
            "Maps providers selected"
        );

        Ok(Self {
            geocoder,
            poi_catalog,
            thumbnails: wikipedia,
        })
    }
}
