//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod image_lookup_port;
mod inference_port;
mod poi_catalog_port;
mod trip_store_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{AddressSuggestion, GeocodedPlace, GeocodingPort};
#[cfg(test)]
pub use image_lookup_port::MockImageLookupPort;
pub use image_lookup_port::ImageLookupPort;
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use poi_catalog_port::MockPoiCatalogPort;
pub use poi_catalog_port::{NearbyPlace, PoiCatalogPort};
#[cfg(test)]
pub use trip_store_port::MockTripStorePort;
pub use trip_store_port::{TripFilter, TripStorePort};
