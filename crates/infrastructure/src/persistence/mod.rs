//! Persistence module
//!
//! SQLite-based storage for generated trips.

pub mod connection;
pub mod migrations;
pub mod trip_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use trip_store::SqliteTripStore;
