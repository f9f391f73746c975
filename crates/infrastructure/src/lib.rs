//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the Gemini inference
//! adapter, geodata adapters over `integration_maps`, and SQLite trip storage.
//! Also owns configuration loading and the construction-time provider wiring.

pub mod adapters;
pub mod config;
pub mod enrichment;
pub mod persistence;
#[cfg(test)]
pub mod testing;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, PipelineConfig, ServerConfig};
pub use enrichment::{EnrichmentPorts, build_enrichment_ports};
pub use persistence::{ConnectionPool, DatabaseError, SqliteTripStore, create_pool};
