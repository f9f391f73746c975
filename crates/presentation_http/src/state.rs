//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{GeocodingPort, PoiCatalogPort, TripService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Trip generation and storage
    pub trip_service: Arc<TripService>,
    /// Geocoder serving the lookup endpoints; the same backend the pipeline uses
    pub geocoder: Arc<dyn GeocodingPort>,
    /// POI catalog serving nearby search and place details, when configured
    pub poi_catalog: Option<Arc<dyn PoiCatalogPort>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("trip_service", &self.trip_service)
            .field("geocoder", &self.geocoder.provider_name())
            .field("poi_catalog", &self.poi_catalog.is_some())
            .finish_non_exhaustive()
    }
}
