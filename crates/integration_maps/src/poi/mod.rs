//! Point-of-interest catalogs
//!
//! Secondary sources that add ratings, review counts and opening hours to a
//! place that has already been geocoded.

mod google_places;
mod opentripmap;

use async_trait::async_trait;
use domain::GeoLocation;

pub use google_places::GooglePlacesClient;
pub use opentripmap::OpenTripMapClient;

use crate::error::MapsError;

/// A point of interest near a coordinate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoiCandidate {
    /// Catalog name, used for matching against itinerary stubs
    pub name: String,
    /// Rating on a 0-5 scale, when rated
    pub rating: Option<f32>,
    /// Number of reviews behind the rating
    pub review_count: Option<u32>,
    /// Price level 0-4
    pub price_level: Option<u8>,
    /// Catalog identifier
    pub external_id: Option<String>,
    /// Catalog categories
    pub kinds: Vec<String>,
}

/// Trait for POI catalogs
#[async_trait]
pub trait PoiCatalog: Send + Sync {
    /// List POIs within `radius_m` meters of `location`, at most `limit`
    async fn nearby(
        &self,
        location: GeoLocation,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PoiCandidate>, MapsError>;

    /// Weekday opening hours for a catalog entry, if the catalog knows them
    async fn opening_hours(&self, _external_id: &str) -> Result<Option<Vec<String>>, MapsError> {
        Ok(None)
    }

    /// Short backend name for logs
    fn provider_name(&self) -> &'static str;
}
