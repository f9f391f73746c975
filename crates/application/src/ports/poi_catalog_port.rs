//! Point-of-interest catalog port

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A catalog entry near a location
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearbyPlace {
    pub name: String,
    /// 0.0-5.0
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    /// 0-4
    pub price_level: Option<u8>,
    pub external_id: Option<String>,
    /// Catalog categories, as the backend names them
    pub kinds: Vec<String>,
}

impl NearbyPlace {
    /// Whether any category contains `kind`, ignoring case
    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        let kind = kind.trim().to_lowercase();
        self.kinds.iter().any(|k| k.to_lowercase().contains(&kind))
    }
}

/// Port for secondary place data (ratings, opening hours)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiCatalogPort: Send + Sync {
    /// Catalog entries within `radius_m` meters of `location`
    async fn nearby(
        &self,
        location: GeoLocation,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<NearbyPlace>, ApplicationError>;

    /// Weekday opening hours for a catalog entry, when known
    async fn opening_hours(
        &self,
        external_id: &str,
    ) -> Result<Option<Vec<String>>, ApplicationError>;
}
