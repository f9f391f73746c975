//! Application services - Use case implementations

mod itinerary_generator;
mod place_enricher;
pub mod synthetic;
mod trip_pipeline;
mod trip_service;

pub use itinerary_generator::{GeneratorHealth, ItineraryGenerator};
pub use place_enricher::{DEFAULT_POI_LIMIT, DEFAULT_POI_RADIUS_M, PlaceEnricher, best_match};
pub use synthetic::SyntheticFiller;
pub use trip_pipeline::{DEFAULT_INTER_PLACE_DELAY, TripEnrichmentPipeline};
pub use trip_service::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, TripService};
