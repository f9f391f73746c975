//! Domain layer for MoodYatra
//!
//! Contains the trip vocabulary: requests, generated itineraries, place stubs
//! and their enriched counterparts. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
