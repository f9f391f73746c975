//! Geodata integration for MoodYatra
//!
//! Resolves place names to coordinates and looks up secondary place data:
//!
//! - [`GeocodingClient`]: forward/reverse geocoding and autocomplete, implemented by
//!   [`NominatimGeocodingClient`] (open, throttled through a shared [`RateLimiter`]) and
//!   [`GoogleGeocodingClient`] (keyed, not throttled).
//! - [`PoiCatalog`]: nearby points of interest with ratings, implemented by
//!   [`OpenTripMapClient`] and [`GooglePlacesClient`].
//! - [`WikipediaClient`]: encyclopedia thumbnails by page title.
//!
//! # Architecture
//!
//! Backends are chosen once, at construction time, by [`MapsProviders::from_config`]
//! based on which credentials are present. Callers only ever see the traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{MapsConfig, MapsProviders};
//!
//! let providers = MapsProviders::from_config(&MapsConfig::default())?;
//! let hit = providers.geocoder.geocode("Louvre Paris").await?;
//! println!("{} -> {}", hit.formatted_address, hit.location);
//! ```

mod config;
mod error;
mod geocoding;
mod poi;
mod providers;
mod rate_limiter;
mod wikipedia;

pub use config::{GoogleMapsConfig, MapsConfig, NominatimConfig, OpenTripMapConfig, WikipediaConfig};
pub use error::MapsError;
pub use geocoding::{
    GeocodeResult, GeocodingClient, GoogleGeocodingClient, NominatimGeocodingClient,
    PlaceSuggestion,
};
pub use poi::{GooglePlacesClient, OpenTripMapClient, PoiCandidate, PoiCatalog};
pub use providers::MapsProviders;
pub use rate_limiter::RateLimiter;
pub use wikipedia::WikipediaClient;
