//! Database migrations
//!
//! Manages database schema versioning and migrations.
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vX` function
//! 3. Update `run_migrations` to call the new function

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations
///
/// # Errors
///
/// Returns an error if the version table cannot be read or a migration fails.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (trips) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
pub fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: trips and their per-place index
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: trips");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trips (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            location TEXT NOT NULL,
            mood TEXT NOT NULL CHECK(mood IN ('fun', 'chill', 'nature', 'romantic')),
            duration_hours INTEGER NOT NULL,
            budget_tier INTEGER NOT NULL CHECK(budget_tier BETWEEN 0 AND 4),
            preferences_json TEXT NOT NULL DEFAULT '[]',
            custom_prompt TEXT,
            itinerary_json TEXT NOT NULL,
            total_distance TEXT NOT NULL,
            estimated_cost TEXT NOT NULL,
            best_time_to_start TEXT NOT NULL,
            transportation_tips TEXT NOT NULL,
            weather_notes TEXT NOT NULL,
            additional_tips TEXT NOT NULL,
            source TEXT NOT NULL,
            is_public INTEGER NOT NULL DEFAULT 1,
            views INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trip_places (
            trip_id TEXT NOT NULL,
            order_index INTEGER NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            lat REAL NOT NULL,
            lng REAL NOT NULL,
            rating REAL NOT NULL,
            review_count INTEGER NOT NULL,
            image_url TEXT NOT NULL,
            external_id TEXT,
            PRIMARY KEY (trip_id, order_index),
            FOREIGN KEY (trip_id) REFERENCES trips(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_trips_public_created ON trips(is_public, created_at);
        CREATE INDEX IF NOT EXISTS idx_trip_places_name ON trip_places(name);
        ",
    )?;

    Ok(())
}
