//! SQLite trip store implementation
//!
//! Implements the `TripStorePort`. The full itinerary is kept as JSON on the
//! `trips` row; `trip_places` is a per-place index kept in visiting order.

use std::{fmt::Display, sync::Arc};

use application::{
    error::ApplicationError,
    ports::{TripFilter, TripStorePort},
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{EnrichedPlace, EnrichedTrip, ItinerarySource, Preferences, TripId, TripRequest};
use rusqlite::{
    Row, Transaction, params, params_from_iter,
    types::{Type, Value},
};
use serde_json::json;
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const TRIP_COLUMNS: &str = "id, title, description, location, mood, duration_hours, budget_tier, \
    preferences_json, custom_prompt, itinerary_json, total_distance, estimated_cost, \
    best_time_to_start, transportation_tips, weather_notes, additional_tips, source, is_public, \
    views, created_at";

/// SQLite-based trip store
#[derive(Debug, Clone)]
pub struct SqliteTripStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteTripStore {
    /// Create a new SQLite trip store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn query_trips<P>(
        &self,
        sql: String,
        params: P,
    ) -> Result<Vec<EnrichedTrip>, ApplicationError>
    where
        P: rusqlite::Params + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn.prepare(&sql).map_err(internal)?;
            let trips = stmt
                .query_map(params, row_to_trip)
                .map_err(internal)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(internal)?;
            Ok(trips)
        })
        .await
        .map_err(internal)?
    }
}

#[async_trait]
impl TripStorePort for SqliteTripStore {
    #[instrument(skip(self, trip), fields(trip_id = %trip.id))]
    async fn save_trip(&self, trip: &EnrichedTrip) -> Result<TripId, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let trip = trip.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(internal)?;
            let tx = conn.transaction().map_err(internal)?;
            insert_trip(&tx, &trip).map_err(internal)?;
            tx.commit().map_err(internal)?;

            debug!(places = trip.places.len(), "Saved trip");
            Ok(trip.id)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(trip_id = %id))]
    async fn get_trip_by_id(&self, id: &TripId) -> Result<Option<EnrichedTrip>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(internal)?;
            let tx = conn.transaction().map_err(internal)?;

            let updated = tx
                .execute("UPDATE trips SET views = views + 1 WHERE id = ?1", [&id_str])
                .map_err(internal)?;
            if updated == 0 {
                return Ok(None);
            }

            let trip = tx
                .query_row(
                    &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                    [&id_str],
                    row_to_trip,
                )
                .map_err(internal)?;
            tx.commit().map_err(internal)?;
            Ok(Some(trip))
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(trip_id = %id))]
    async fn find_trip(&self, id: &TripId) -> Result<Option<EnrichedTrip>, ApplicationError> {
        let mut trips = self
            .query_trips(
                format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"),
                [id.to_string()],
            )
            .await?;
        Ok(trips.pop())
    }

    #[instrument(skip(self))]
    async fn list_public_trips(&self, limit: u32) -> Result<Vec<EnrichedTrip>, ApplicationError> {
        self.query_trips(
            format!(
                "SELECT {TRIP_COLUMNS} FROM trips WHERE is_public = 1
                 ORDER BY created_at DESC LIMIT ?1"
            ),
            [i64::from(limit)],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_public_trips(
        &self,
        query: &str,
        filter: &TripFilter,
        limit: u32,
    ) -> Result<Vec<EnrichedTrip>, ApplicationError> {
        let mut sql = format!(
            "SELECT {TRIP_COLUMNS} FROM trips
             WHERE is_public = 1
               AND (title LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'
                    OR location LIKE ?1 ESCAPE '\\')"
        );
        let mut params: Vec<Value> = vec![Value::Text(format!("%{}%", escape_like(query.trim())))];

        if let Some(mood) = filter.mood {
            params.push(Value::Text(mood.as_str().to_string()));
            sql.push_str(&format!(" AND mood = ?{}", params.len()));
        }
        if let Some(location) = &filter.location {
            params.push(Value::Text(format!("%{}%", escape_like(location.trim()))));
            sql.push_str(&format!(" AND location LIKE ?{} ESCAPE '\\'", params.len()));
        }

        params.push(Value::Integer(i64::from(limit)));
        sql.push_str(&format!(" ORDER BY created_at DESC LIMIT ?{}", params.len()));

        self.query_trips(sql, params_from_iter(params)).await
    }
}

fn internal(e: impl Display) -> ApplicationError {
    ApplicationError::Internal(format!("Database error: {e}"))
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn insert_trip(tx: &Transaction<'_>, trip: &EnrichedTrip) -> rusqlite::Result<()> {
    let id = trip.id.to_string();
    let request = &trip.request;

    tx.execute("DELETE FROM trip_places WHERE trip_id = ?1", [&id])?;
    tx.execute(
        "INSERT OR REPLACE INTO trips (
            id, title, description, location, mood, duration_hours, budget_tier,
            preferences_json, custom_prompt, itinerary_json, total_distance, estimated_cost,
            best_time_to_start, transportation_tips, weather_notes, additional_tips, source,
            is_public, views, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            id,
            trip.title,
            trip.description,
            request.location(),
            request.mood().as_str(),
            request.duration_hours(),
            request.budget_tier().value(),
            to_json(request.preferences())?,
            request.custom_prompt(),
            to_json(&trip.places)?,
            trip.total_distance_label,
            trip.estimated_cost_label,
            trip.best_time_to_start,
            trip.transportation_tips,
            trip.weather_notes,
            trip.additional_tips,
            to_json(&trip.source)?,
            trip.is_public,
            i64::try_from(trip.view_count).unwrap_or(i64::MAX),
            trip.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        ],
    )?;

    let mut stmt = tx.prepare(
        "INSERT INTO trip_places (
            trip_id, order_index, name, kind, lat, lng, rating, review_count, image_url, external_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    for (index, place) in trip.places.iter().enumerate() {
        stmt.execute(params![
            id,
            i64::try_from(index).unwrap_or(i64::MAX),
            place.name,
            place.kind,
            place.latitude,
            place.longitude,
            f64::from(place.rating),
            place.review_count,
            place.image_url,
            place.external_id,
        ])?;
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> rusqlite::Result<String> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn from_json<T: serde::de::DeserializeOwned>(column: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn row_to_trip(row: &Row<'_>) -> rusqlite::Result<EnrichedTrip> {
    let id_str: String = row.get(0)?;
    let id = TripId::parse(&id_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    let preferences_json: String = row.get(7)?;
    let preferences: Preferences = from_json(7, &preferences_json)?;
    let request_json = json!({
        "mood": row.get::<_, String>(4)?,
        "location": row.get::<_, String>(3)?,
        "durationHours": row.get::<_, u8>(5)?,
        "budgetTier": row.get::<_, u8>(6)?,
        "preferences": preferences,
        "customPrompt": row.get::<_, Option<String>>(8)?,
    });
    let request: TripRequest = serde_json::from_value(request_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let itinerary_json: String = row.get(9)?;
    let places: Vec<EnrichedPlace> = from_json(9, &itinerary_json)?;
    let source_json: String = row.get(16)?;
    let source: ItinerarySource = from_json(16, &source_json)?;

    let views: i64 = row.get(18)?;
    let created_at_str: String = row.get(19)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(EnrichedTrip {
        id,
        created_at,
        request,
        title: row.get(1)?,
        description: row.get(2)?,
        places,
        total_distance_label: row.get(10)?,
        estimated_cost_label: row.get(11)?,
        best_time_to_start: row.get(12)?,
        transportation_tips: row.get(13)?,
        weather_notes: row.get(14)?,
        additional_tips: row.get(15)?,
        source,
        is_public: row.get(17)?,
        view_count: u64::try_from(views).unwrap_or(0),
    })
}
