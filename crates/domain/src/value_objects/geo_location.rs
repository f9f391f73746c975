//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Known city centroids used when a place cannot be geocoded
const CITY_CENTROIDS: &[(&str, f64, f64)] = &[
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
    ("chicago", 41.8781, -87.6298),
    ("san francisco", 37.7749, -122.4194),
    ("miami", 25.7617, -80.1918),
    ("seattle", 47.6062, -122.3321),
    ("boston", 42.3601, -71.0589),
    ("austin", 30.2672, -97.7431),
    ("denver", 39.7392, -104.9903),
    ("portland", 45.5152, -122.6784),
    ("las vegas", 36.1699, -115.1398),
    ("orlando", 28.5383, -81.3792),
    ("nashville", 36.1627, -86.7816),
    ("phoenix", 33.4484, -112.0740),
    ("san diego", 32.7157, -117.1611),
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
    ("tokyo", 35.6762, 139.6503),
    ("mumbai", 19.0760, 72.8777),
    ("delhi", 28.7041, 77.1025),
    ("bangalore", 12.9716, 77.5946),
];

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Shift the location by the given deltas in degrees, clamped to the valid range
    #[must_use]
    pub fn offset(&self, delta_lat: f64, delta_lng: f64) -> Self {
        Self {
            latitude: (self.latitude + delta_lat).clamp(-90.0, 90.0),
            longitude: (self.longitude + delta_lng).clamp(-180.0, 180.0),
        }
    }

    /// Calculate approximate distance to another location in kilometers
    ///
    /// Uses the Haversine formula for great-circle distance
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Fallback location when nothing better is known
    #[must_use]
    pub const fn default_city() -> Self {
        Self::new_unchecked(40.7128, -74.0060)
    }

    /// Approximate centroid of the city named in a free-text reference location
    ///
    /// Matches case-insensitively by containment ("Paris, France" -> Paris) and
    /// falls back to [`GeoLocation::default_city`] for unknown places.
    #[must_use]
    pub fn city_centroid(reference: &str) -> Self {
        let reference = reference.to_lowercase();
        CITY_CENTROIDS
            .iter()
            .find(|(city, _, _)| reference.contains(city))
            .map_or_else(Self::default_city, |&(_, lat, lng)| {
                Self::new_unchecked(lat, lng)
            })
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let loc = GeoLocation::new(48.8566, 2.3522).expect("valid coordinates");
        assert!((loc.latitude() - 48.8566).abs() < f64::EPSILON);
        assert!((loc.longitude() - 2.3522).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn invalid_coordinates_rejected() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn city_centroid_matches_by_containment() {
        let paris = GeoLocation::city_centroid("Paris, France");
        assert!((paris.latitude() - 48.8566).abs() < 1e-9);
        assert!((paris.longitude() - 2.3522).abs() < 1e-9);

        let sf = GeoLocation::city_centroid("downtown SAN FRANCISCO");
        assert!((sf.latitude() - 37.7749).abs() < 1e-9);
    }

    #[test]
    fn unknown_city_falls_back_to_default() {
        let loc = GeoLocation::city_centroid("Reykjavik");
        assert_eq!(loc, GeoLocation::default_city());
    }

    #[test]
    fn offset_is_clamped() {
        let loc = GeoLocation::new_unchecked(89.99, 179.99).offset(0.02, 0.02);
        assert!((loc.latitude() - 90.0).abs() < f64::EPSILON);
        assert!((loc.longitude() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_paris_london() {
        let paris = GeoLocation::city_centroid("paris");
        let london = GeoLocation::city_centroid("london");
        // roughly 344 km
        assert!((paris.distance_km(&london) - 344.0).abs() < 10.0);
    }

    #[test]
    fn serialization_roundtrip() {
        let loc = GeoLocation::new(35.6762, 139.6503).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        let back: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, back);
    }
}
