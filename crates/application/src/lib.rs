//! Application layer - Use cases and orchestration
//!
//! Turns a [`TripRequest`](domain::TripRequest) into a persisted
//! [`EnrichedTrip`](domain::EnrichedTrip): itinerary generation with a canned
//! fallback, per-place enrichment against interchangeable geodata ports, and
//! the pipeline that sequences them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
